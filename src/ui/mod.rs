pub mod dependence;
pub mod importance;
pub mod individual;
pub mod overview;
pub mod panels;
pub mod plot;
