//! Common styling for the terminal chart

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

/// Sampled population
pub const POPULATION_COLOR: Color = Color::DarkGray;

/// Maximum-Sharpe portfolio
pub const OPTIMAL_COLOR: Color = Color::Green;

/// Risk-free point
pub const RISK_FREE_COLOR: Color = Color::LightBlue;

/// Capital Allocation Line
pub const CAL_COLOR: Color = Color::Blue;

/// Portfolios defined in the parameters file
pub const USER_COLOR: Color = Color::Magenta;

/// Portfolio currently inspected in the side panel
pub const SELECTED_COLOR: Color = Color::Yellow;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// Excess return above the risk-free rate
pub const POSITIVE_COLOR: Color = Color::Green;

/// Return below the risk-free rate
pub const NEGATIVE_COLOR: Color = Color::Red;

/// Create a bordered block with a title and optional bottom help text.
///
/// # Example
/// ```ignore
/// let block = panel_block("Composition", "[↑/↓] rank [Home] optimal");
/// frame.render_widget(Paragraph::new("...").block(block), area);
/// ```
pub fn panel_block(title: &str, help_text: &str) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(format!(" {title} ")).fg(HEADER_COLOR));

    if !help_text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {help_text} ")).fg(HELP_COLOR));
    }

    block
}

/// Color of an expected return relative to the risk-free rate
pub fn excess_return_color(expected_return: f64, risk_free_rate: f64) -> Color {
    if expected_return >= risk_free_rate {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}
