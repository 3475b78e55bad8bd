use std::ops::RangeInclusive;

/// The smallest range containing every item, `0..=0` if there is none.
pub fn range_of<Idx, Itr>(itr: Itr) -> RangeInclusive<Idx>
where Idx: Ord + Default + Copy, Itr: IntoIterator<Item = Idx> { 
    let minmax = itr.into_iter().fold(None, |res, i| 
        match res { 
            Some((min, max)) => Some((Ord::min(min, i), Ord::max(max, i))),
            None => Some((i, i))
        }
    );

    match minmax { 
        Some((min, max)) => min ..= max,
        None => Idx::default() ..= Idx::default()
    }
}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn range() { 
        assert_eq!(range_of([3, -1, 5, 0]), -1..=5);
        assert_eq!(range_of([2]), 2..=2);
        assert_eq!(range_of(Vec::<isize>::new()), 0..=0);
    }
}
