mod asset;
mod ids;
mod period;
mod portfolio;
mod results;
mod returns;

pub use asset::AssetClass;
pub use ids::{AssetId, PortfolioId};
pub use period::Period;
pub use portfolio::{Holding, Portfolio, PortfolioDisplay};
pub use results::FrontierResult;
pub use returns::ReturnsTable;
