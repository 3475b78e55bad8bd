mod alg;
mod gen;
mod cube;
mod complex;
mod homology;

pub use alg::KhAlg;
pub use gen::{KhGen, KhTensor, KhChainGen, KhChain, KhChainExt};
pub use cube::{KhCube, KhCubeVertex, KhCubeEdge, KhCubeEdgeTrans};
pub use complex::KhComplex;
pub use homology::{KhHomology, KhHomologyBigraded};
