use std::path::Path;

use serde_json::{Value, json};

use super::ChartData;
use crate::util::io::atomic_write;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

fn traces(data: &ChartData) -> Value {
    let (names, (xs, ys)): (Vec<&str>, (Vec<f64>, Vec<f64>)) = data
        .population
        .iter()
        .map(|r| (r.name.as_str(), (r.std_dev, r.expected_return)))
        .unzip();

    let mut traces = vec![
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": "Portfolios",
            "x": xs,
            "y": ys,
            "text": names,
            "marker": { "color": "grey", "opacity": 0.5 },
        }),
        json!({
            "type": "scatter",
            "mode": "lines",
            "name": "Capital Allocation Line",
            "x": [data.cal[0].0, data.cal[1].0],
            "y": [data.cal[0].1, data.cal[1].1],
            "line": { "color": "blue", "width": 3 },
        }),
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": data.risk_free.name,
            "x": [data.risk_free.std_dev],
            "y": [data.risk_free.expected_return],
            "marker": { "color": "lightblue", "size": 15 },
        }),
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": format!("Optimal ({})", data.optimal.name),
            "x": [data.optimal.std_dev],
            "y": [data.optimal.expected_return],
            "marker": { "color": "green", "size": 25 },
        }),
    ];

    traces.extend(data.user.iter().map(|p| {
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": p.name,
            "x": [p.std_dev],
            "y": [p.expected_return],
            "marker": { "color": "magenta", "size": 15, "symbol": "diamond" },
        })
    }));

    Value::Array(traces)
}

fn layout(data: &ChartData) -> Value {
    json!({
        "title": { "text": data.title },
        "xaxis": {
            "title": { "text": "Standard deviation" },
            "tickformat": ".1%",
            "range": data.x_bounds,
        },
        "yaxis": {
            "title": { "text": "Expected return" },
            "tickformat": ".1%",
            "range": data.y_bounds,
        },
        "hovermode": "closest",
    })
}

/// JSON embedded in a script element must not close it early
fn script_json(value: &Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone page plotting the frontier with plotly
pub fn render_html(data: &ChartData) -> Result<String, serde_json::Error> {
    let traces = script_json(&traces(data))?;
    let layout = script_json(&layout(data))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}"></script>
</head>
<body>
<div id="frontier" style="width:100%;height:95vh;"></div>
<script>
Plotly.newPlot("frontier", {traces}, {layout}, {{ responsive: true }});
</script>
</body>
</html>
"#,
        title = escape_html(&data.title),
    ))
}

/// Render the chart page and write it atomically to `path`
pub fn write_html(path: &Path, data: &ChartData) -> color_eyre::Result<()> {
    let html = render_html(data)?;
    atomic_write(path, &html)?;
    tracing::info!(path = %path.display(), "HTML chart written");
    Ok(())
}
