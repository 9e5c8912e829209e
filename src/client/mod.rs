//! Terminal form client for the prediction service
//!
//! Walks the operator through the campaign call sheet one field at a
//! time, posts the completed form to the service, and renders the
//! verdict. The client is deliberately defensive about the response
//! body: a missing prediction renders as N/A and a missing probability
//! is simply not shown.

use std::time::Duration;

use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::schema;

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}
fn warn(s: &str) -> ColoredString {
    s.truecolor(230, 140, 100)
}

/// Client configuration
///
/// Endpoint and timeout resolution, including the `API_URL` fallback,
/// lives in the CLI layer; this struct only carries the result.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub timeout_secs: u64,
}

/// A completed call sheet, serialized field for field as the service
/// expects it
///
/// Counts and dates go out as integers, the account balance as a float.
#[derive(Debug, Clone, Serialize)]
pub struct FormAnswers {
    pub age: i64,
    pub job: String,
    pub marital: String,
    pub education: String,
    #[serde(rename = "default")]
    pub default_credit: String,
    pub balance: f64,
    pub housing: String,
    pub loan: String,
    pub contact: String,
    pub day: i64,
    pub month: String,
    pub duration: i64,
    pub campaign: i64,
    pub pdays: i64,
    pub previous: i64,
    pub poutcome: String,
}

impl Default for FormAnswers {
    /// The untouched form: every numeric at its suggested value, every
    /// select on its first choice
    fn default() -> Self {
        Self {
            age: 40,
            job: schema::JOB_CHOICES[0].to_string(),
            marital: schema::MARITAL_CHOICES[0].to_string(),
            education: schema::EDUCATION_CHOICES[0].to_string(),
            default_credit: schema::DEFAULT_CHOICES[0].to_string(),
            balance: 1000.0,
            housing: schema::HOUSING_CHOICES[0].to_string(),
            loan: schema::LOAN_CHOICES[0].to_string(),
            contact: schema::CONTACT_CHOICES[0].to_string(),
            day: 15,
            month: schema::MONTH_CHOICES[0].to_string(),
            duration: 200,
            campaign: 1,
            pdays: -1,
            previous: 0,
            poutcome: schema::POUTCOME_CHOICES[0].to_string(),
        }
    }
}

fn form_theme() -> ColorfulTheme {
    ColorfulTheme {
        active_item_prefix: dialoguer::console::style("  ›".to_string())
            .for_stderr()
            .cyan(),
        active_item_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        inactive_item_prefix: dialoguer::console::style("   ".to_string()).for_stderr(),
        inactive_item_style: dialoguer::console::Style::new().for_stderr().color256(245),
        prompt_prefix: dialoguer::console::style("  ?".to_string())
            .for_stderr()
            .color256(111),
        prompt_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        ..ColorfulTheme::default()
    }
}

fn select_choice(theme: &ColorfulTheme, prompt: &str, choices: &[&str]) -> anyhow::Result<String> {
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()?;
    Ok(choices[index].to_string())
}

/// Prompt for every field of the call sheet, in form order
pub fn collect_answers(theme: &ColorfulTheme) -> anyhow::Result<FormAnswers> {
    let age: i64 = Input::with_theme(theme)
        .with_prompt("Age")
        .default(40)
        .validate_with(|v: &i64| {
            if (16..=120).contains(v) {
                Ok(())
            } else {
                Err("age must be between 16 and 120")
            }
        })
        .interact_text()?;

    let job = select_choice(theme, "Job", schema::JOB_CHOICES)?;
    let marital = select_choice(theme, "Marital", schema::MARITAL_CHOICES)?;
    let education = select_choice(theme, "Education", schema::EDUCATION_CHOICES)?;
    let default_credit = select_choice(theme, "Default (credit)", schema::DEFAULT_CHOICES)?;

    let balance: f64 = Input::with_theme(theme)
        .with_prompt("Balance")
        .default(1000.0)
        .interact_text()?;

    let housing = select_choice(theme, "Housing loan", schema::HOUSING_CHOICES)?;
    let loan = select_choice(theme, "Personal loan", schema::LOAN_CHOICES)?;
    let contact = select_choice(theme, "Contact", schema::CONTACT_CHOICES)?;

    let day: i64 = Input::with_theme(theme)
        .with_prompt("Last contact day of month")
        .default(15)
        .validate_with(|v: &i64| {
            if (1..=31).contains(v) {
                Ok(())
            } else {
                Err("day must be between 1 and 31")
            }
        })
        .interact_text()?;

    let month = select_choice(theme, "Month", schema::MONTH_CHOICES)?;

    let duration: i64 = Input::with_theme(theme)
        .with_prompt("Last contact duration (s)")
        .default(200)
        .validate_with(|v: &i64| {
            if *v >= 0 {
                Ok(())
            } else {
                Err("duration cannot be negative")
            }
        })
        .interact_text()?;

    let campaign: i64 = Input::with_theme(theme)
        .with_prompt("Campaign (contacts in this campaign)")
        .default(1)
        .validate_with(|v: &i64| {
            if *v >= 1 {
                Ok(())
            } else {
                Err("campaign count starts at 1")
            }
        })
        .interact_text()?;

    let pdays: i64 = Input::with_theme(theme)
        .with_prompt("Days since last contact (-1 if never)")
        .default(-1)
        .interact_text()?;

    let previous: i64 = Input::with_theme(theme)
        .with_prompt("Number of contacts previously")
        .default(0)
        .validate_with(|v: &i64| {
            if *v >= 0 {
                Ok(())
            } else {
                Err("count cannot be negative")
            }
        })
        .interact_text()?;

    let poutcome = select_choice(theme, "Outcome of previous campaign", schema::POUTCOME_CHOICES)?;

    Ok(FormAnswers {
        age,
        job,
        marital,
        education,
        default_credit,
        balance,
        housing,
        loan,
        contact,
        day,
        month,
        duration,
        campaign,
        pdays,
        previous,
        poutcome,
    })
}

fn prediction_line(body: &Value) -> String {
    let label = body
        .get("prediction")
        .and_then(Value::as_str)
        .unwrap_or("N/A");
    format!("Prediction: {}", label.to_uppercase())
}

fn probability_line(body: &Value) -> Option<String> {
    body.get("probability")
        .and_then(Value::as_f64)
        .map(|p| format!("Probability of subscription: {:.4}", p))
}

fn api_error_line(status: u16, body: &str) -> String {
    format!("API error: {} - {}", status, body)
}

/// Run the interactive form once and render the service's answer
pub async fn run_form(config: ClientConfig) -> anyhow::Result<()> {
    println!();
    println!("  {}", "Bank Marketing Predictor".white().bold());
    println!("  {}", dim("Predict term deposit subscription"));
    println!("  {}", dim(&format!("backend {}", config.url)));
    println!();

    let theme = form_theme();
    let answers = collect_answers(&theme)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    println!();
    println!("  {} Calling backend...", accent("›"));

    match client.post(&config.url).json(&answers).send().await {
        Ok(response) if response.status() == StatusCode::OK => match response.json::<Value>().await
        {
            Ok(body) => {
                println!();
                println!("  {} {}", ok("✓"), prediction_line(&body).white().bold());
                if let Some(line) = probability_line(&body) {
                    println!("    {}", line);
                }
                println!();
            }
            Err(e) => {
                println!();
                println!("  {} Request failed: {}", warn("✗"), e);
                println!();
            }
        },
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            println!();
            println!("  {} {}", warn("✗"), api_error_line(status, &body));
            println!();
        }
        Err(e) => {
            println!();
            println!("  {} Request failed: {}", warn("✗"), e);
            println!();
        }
    }

    Ok(())
}
