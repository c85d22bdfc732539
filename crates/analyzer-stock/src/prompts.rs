//! Prompt templates for the analysis conversation

use analyzer_core::{Error, Result};
use chrono::NaiveDate;
use minijinja::{Environment, context};

const ANALYSIS_PROMPT: &str = "\
Retrieve the {{ interval }} data for the stock symbol '{{ symbol }}'.
Using the data retrieved, plot a line graph containing the average open prices, average highs, \
average lows, and average close prices for each month. \
Using the same data, in the same image, add a separate bar graph below, and plot the average \
volume traded in each month.
The current date is {{ today }}. Make sure to only analyze and plot data from the past three \
months. Disregard data points older than 90 days from today. \
Make sure to label the datapoints with format MM-YYYY in the horizontal axis, and to represent \
them in ASCENDING TIME order.";

/// Render the user message that starts the analysis
pub fn analysis_prompt(symbol: &str, interval: &str, today: NaiveDate) -> Result<String> {
    let env = Environment::new();
    env.render_str(
        ANALYSIS_PROMPT,
        context! {
            symbol => symbol,
            interval => interval,
            today => today.format("%Y-%m-%d").to_string(),
        },
    )
    .map_err(|e| Error::Template(e.to_string()))
}
