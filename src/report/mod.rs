/// Presentation data: pure, deterministic tables and chart layouts built from
/// the session's immutable artifacts plus the current selection. The `ui`
/// layer only draws what these functions return.
///
/// ```text
///   Session ──► importance   ranking + top-N bars
///          ├──► summary      beeswarm rows
///          ├──► individual   prediction, risk, waterfall, force, top-5
///          └──► dependence   scatter + interaction colouring
/// ```
pub mod contributions;
pub mod dependence;
pub mod force;
pub mod importance;
pub mod individual;
pub mod risk;
pub mod summary;
pub mod waterfall;
