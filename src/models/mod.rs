pub mod brownian;
pub mod cir;
pub mod gbm;
pub mod model;
pub mod vasicek;

pub use brownian::{standard_brownian_motion, StandardBrownianMotion};
pub use cir::{cox_ingersoll_ross, Cir, CirBoundary, CirParams};
pub use gbm::{geometric_brownian_motion, Gbm};
pub use model::StochasticProcess;
pub use vasicek::{vasicek, Vasicek, VasicekParams};
