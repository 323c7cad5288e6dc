pub mod bs_analytic;
pub mod bs_fd;
pub mod vasicek_bond;
