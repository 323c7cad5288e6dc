pub mod euler_maruyama;
pub mod time_grid;
