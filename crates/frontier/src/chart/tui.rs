use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use frontier_core::{Portfolio, PortfolioId};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph},
};

use super::ChartData;
use crate::app::Analysis;
use crate::util::format::{format_percentage, format_sharpe, format_weight};
use crate::util::styles::{
    CAL_COLOR, HELP_COLOR, OPTIMAL_COLOR, POPULATION_COLOR, RISK_FREE_COLOR, SELECTED_COLOR,
    USER_COLOR, excess_return_color, panel_block,
};

const SIDE_PANEL_WIDTH: u16 = 40;

/// Interactive terminal view of the frontier.
///
/// The side panel walks the population from the highest Sharpe ratio
/// down; the selected portfolio is highlighted on the chart.
pub struct ChartApp<'a> {
    analysis: &'a Analysis,
    data: ChartData,
    ranked: Vec<PortfolioId>,
    selected: usize,
    show_cal: bool,
    exit: bool,
}

impl<'a> ChartApp<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            analysis,
            data: ChartData::from_analysis(analysis),
            ranked: analysis.result.ranked_by_sharpe(),
            selected: 0,
            show_cal: true,
            exit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        tracing::info!(portfolios = self.ranked.len(), "Opening frontier chart");
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('c') => self.show_cal = !self.show_cal,
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.ranked.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.ranked.len().saturating_sub(1),
            _ => {}
        }
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.exit
    }

    #[must_use]
    pub fn shows_cal(&self) -> bool {
        self.show_cal
    }

    /// Portfolio shown in the side panel
    #[must_use]
    pub fn selected(&self) -> Option<&'a Portfolio> {
        let analysis = self.analysis;
        self.ranked
            .get(self.selected)
            .and_then(|id| analysis.result.get(*id))
    }

    pub fn draw(&self, frame: &mut Frame) {
        let [chart_area, panel_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
                .areas(frame.area());

        self.render_chart(frame, chart_area);
        self.render_panel(frame, panel_area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let population = self.data.population_points();
        let optimal = [self.data.optimal.xy()];
        let risk_free = [self.data.risk_free.xy()];
        let user: Vec<(f64, f64)> = self.data.user.iter().map(|p| p.xy()).collect();
        let selected: Vec<(f64, f64)> = self
            .selected()
            .map(|p| (p.std_dev(), p.expected_return()))
            .into_iter()
            .collect();

        let mut datasets = vec![
            Dataset::default()
                .name("Portfolios")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(POPULATION_COLOR))
                .data(&population),
        ];
        if self.show_cal {
            datasets.push(
                Dataset::default()
                    .name("CAL")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(CAL_COLOR))
                    .data(&self.data.cal),
            );
        }
        if !user.is_empty() {
            datasets.push(
                Dataset::default()
                    .name("User")
                    .marker(symbols::Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(USER_COLOR))
                    .data(&user),
            );
        }
        datasets.push(
            Dataset::default()
                .name("Risk-free")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(RISK_FREE_COLOR))
                .data(&risk_free),
        );
        datasets.push(
            Dataset::default()
                .name("Selected")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(SELECTED_COLOR))
                .data(&selected),
        );
        datasets.push(
            Dataset::default()
                .name("Optimal")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(OPTIMAL_COLOR))
                .data(&optimal),
        );

        let [x_min, x_max] = self.data.x_bounds;
        let [y_min, y_max] = self.data.y_bounds;
        let x_axis = Axis::default()
            .title("Standard deviation".dark_gray())
            .bounds(self.data.x_bounds)
            .labels(axis_labels(x_min, x_max));
        let y_axis = Axis::default()
            .title("Expected return".dark_gray())
            .bounds(self.data.y_bounds)
            .labels(axis_labels(y_min, y_max));

        let chart = Chart::new(datasets)
            .block(panel_block(&self.data.title, "[q] quit [c] toggle CAL"))
            .x_axis(x_axis)
            .y_axis(y_axis);

        frame.render_widget(chart, area);
    }

    fn render_panel(&self, frame: &mut Frame, area: Rect) {
        let block = panel_block("Portfolio", "[↑/↓] rank [Home] optimal");
        let rf = self.analysis.risk_free_rate();

        let Some(portfolio) = self.selected() else {
            let empty = Paragraph::new("No portfolios").style(Style::default().fg(HELP_COLOR));
            frame.render_widget(empty.block(block), area);
            return;
        };

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(portfolio.name().to_string(), bold.fg(SELECTED_COLOR)),
                Span::styled(
                    format!("  #{} of {}", self.selected + 1, self.ranked.len()),
                    Style::default().fg(HELP_COLOR),
                ),
            ]),
            Line::from(""),
        ];

        for holding in portfolio.composition() {
            let name = self
                .analysis
                .assets
                .get(holding.asset.index())
                .map_or("?", |a| a.name());
            lines.push(Line::from(vec![
                Span::raw(format!("{:>8} ", format_weight(holding.weight))),
                Span::raw(name.to_string()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("E(r)   ", bold),
            Span::styled(
                format_percentage(portfolio.expected_return()),
                Style::default().fg(excess_return_color(portfolio.expected_return(), rf)),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("sd     ", bold),
            Span::raw(format_percentage(portfolio.std_dev())),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Sharpe ", bold),
            Span::raw(format_sharpe(portfolio.sharpe_ratio(rf))),
        ]));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw(format_percentage(min)),
        Span::raw(format_percentage((min + max) / 2.0)),
        Span::raw(format_percentage(max)),
    ]
}
