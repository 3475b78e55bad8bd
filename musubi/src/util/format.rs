use std::fmt::Display;
use itertools::Itertools;

pub fn paren_expr<S>(s: S) -> String
where S: Display {
    let s = s.to_string();
    if s.contains(' ') { 
        format!("({s})")
    } else { 
        s
    }
}

/// Formats `Σ r x` as `r₀x₀ + r₁x₁ - ...`, omitting unit coefficients. 
pub fn lc<X, R, S>(terms: S) -> String
where 
    X: Display, 
    R: Display, 
    S: IntoIterator<Item = (X, R)>
{ 
    let mut res = String::new();
    
    for (k, (x, r)) in terms.into_iter().enumerate() {
        let r = paren_expr(r);
        let x = x.to_string();

        let (neg, r) = match r.strip_prefix('-') { 
            Some(r) => (true, r.to_string()),
            None    => (false, r)
        };

        let term = if r == "1" { 
            x
        } else if x == "1" { 
            r
        } else { 
            format!("{r}{x}")
        };

        match (k, neg) { 
            (0, false) => {},
            (0, true)  => res.push('-'),
            (_, false) => res.push_str(" + "),
            (_, true)  => res.push_str(" - "),
        }
        res.push_str(&term);
    }

    if res.is_empty() { 
        String::from("0")
    } else { 
        res
    }
}

fn script(i: isize, digits: [char; 10], minus: char) -> String { 
    let mut res = String::new();
    if i < 0 { 
        res.push(minus);
    }
    for c in i.unsigned_abs().to_string().chars() { 
        let d = c as usize - '0' as usize;
        res.push(digits[d]);
    }
    res
}

pub fn subscript(i: isize) -> String {
    const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    script(i, DIGITS, '₋')
}

pub fn superscript(i: isize) -> String { 
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    script(i, DIGITS, '⁻')
}

/// Formats a grid with row labels `rows` and column labels `cols`, 
/// the cell `(i, j)` given by `entry(i, j)`.
pub fn table<S, I, J, I1, I2, D, F>(head: S, rows: I1, cols: I2, entry: F) -> String
where 
    S: Display,
    I: Display,
    J: Display,
    I1: IntoIterator<Item = I>,
    I2: IntoIterator<Item = J>,
    D: Display,
    F: Fn(&I, &J) -> D
{
    use prettytable::{format, Cell, Row, Table};

    let rows = rows.into_iter().collect_vec();
    let cols = cols.into_iter().collect_vec();

    fn row<C>(head: String, cells: C) -> Row
    where C: Iterator<Item = String> { 
        let mut res = vec![Cell::new(&head)];
        res.extend(cells.map(|s| Cell::new(&s)));
        Row::new(res)
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row(
        head.to_string(), 
        cols.iter().map(|j| j.to_string())
    ));

    for i in rows.iter() { 
        table.add_row(row(
            i.to_string(), 
            cols.iter().map(|j| entry(i, j).to_string())
        ));
    }

    table.to_string()
}
