use std::fmt::Write;

use frontier_core::{AssetClass, Portfolio};

use crate::app::Analysis;
use crate::util::format::{format_percentage, format_sharpe, format_weight};

/// Render one portfolio block: heading, name, holdings in asset order, then
/// E(r), sd and Sharpe ratio.
pub fn render_portfolio(
    heading: &str,
    portfolio: &Portfolio,
    assets: &[AssetClass],
    risk_free_rate: f64,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "~~~ {heading} ~~~");
    let _ = writeln!(out, "{}", portfolio.name());
    for holding in portfolio.composition() {
        let name = assets
            .get(holding.asset.index())
            .map_or("<unknown>", AssetClass::name);
        let _ = writeln!(out, "    {} : {name}", format_weight(holding.weight));
    }
    let _ = writeln!(out, "E(r)   = {}", format_percentage(portfolio.expected_return()));
    let _ = writeln!(out, "sd     = {}", format_percentage(portfolio.std_dev()));
    let _ = writeln!(
        out,
        "Sharpe = {}",
        format_sharpe(portfolio.sharpe_ratio(risk_free_rate))
    );
    out
}

/// Full console report of an analysis
pub fn render_console(analysis: &Analysis) -> String {
    let rf = analysis.risk_free_rate();
    let mut out = String::new();

    let _ = writeln!(out, "{}", analysis.title());
    let _ = writeln!(out, "Risk-free rate : {}", format_percentage(rf));
    if let Some(borrowing) = analysis.params.borrowing_rate {
        let _ = writeln!(out, "Borrowing rate : {}", format_percentage(borrowing));
    }
    let _ = writeln!(out, "Seed           : {}", analysis.seed);
    let _ = writeln!(out);

    out.push_str(&render_portfolio(
        "Optimal Portfolio",
        analysis.result.optimal(),
        &analysis.assets,
        rf,
    ));

    for user in &analysis.user_portfolios {
        let _ = writeln!(out);
        out.push_str(&render_portfolio("User Portfolio", user, &analysis.assets, rf));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_core::{AssetId, CorrelationMatrix, Holding, Period, PortfolioId};

    #[test]
    fn test_render_portfolio_block() {
        let assets = vec![
            AssetClass::with_statistics(AssetId(0), "VTI", Period::Month, 0.10, 0.15),
            AssetClass::with_statistics(AssetId(1), "BND", Period::Month, 0.04, 0.03),
        ];
        let corr = CorrelationMatrix::identity(vec!["VTI".into(), "BND".into()]).with(
            AssetId(0),
            AssetId(1),
            0.2,
        );
        let portfolio = Portfolio::new(
            PortfolioId(0),
            "Portfolio7",
            vec![
                Holding {
                    asset: AssetId(0),
                    weight: 25.0,
                },
                Holding {
                    asset: AssetId(1),
                    weight: 75.0,
                },
            ],
            &assets,
            &corr,
        )
        .unwrap();

        let text = render_portfolio("Optimal Portfolio", &portfolio, &assets, 0.02);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "~~~ Optimal Portfolio ~~~");
        assert_eq!(lines[1], "Portfolio7");
        assert_eq!(lines[2], "    25.00% : VTI");
        assert_eq!(lines[3], "    75.00% : BND");
        assert_eq!(lines[4], "E(r)   = 5.50%");
        assert!(lines[5].starts_with("sd     = "));
        assert!(lines[6].starts_with("Sharpe = "));
        assert_eq!(lines.len(), 7);
    }
}
