use std::fmt::Write;

use chrono::{DateTime, Local, TimeZone, Utc};
use comfy_table::Cell;

use crate::dashboard::{Dashboard, DeploymentSummary, EnvironmentRow, ProjectRow};

use super::styling::{bright, dim};
use super::tables::{color_coded_age_cell, create_table, cyan_header, empty_cell};

const COLUMNS: [&str; 5] = [
    "Environment",
    "Branch",
    "Latest Deploy",
    "Latest Commit",
    "Triggered By",
];

/// Prints the deployment dashboard to stdout.
///
/// One table per project, one row per displayed environment. Environments
/// without a deployment render as a row of `-` cells.
pub fn print_dashboard(dashboard: &Dashboard) {
    println!("{}", render_dashboard(dashboard, Utc::now()));
}

pub fn render_dashboard(dashboard: &Dashboard, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    if dashboard.projects.is_empty() {
        let _ = writeln!(
            output,
            "{}",
            dim(format!(
                "No deployments to display on {}",
                dashboard.gitlab_url
            ))
        );
        return output;
    }

    for project in &dashboard.projects {
        render_project(&mut output, project, now);
    }

    let environment_count: usize = dashboard
        .projects
        .iter()
        .map(|p| p.environments.len())
        .sum();
    let _ = writeln!(
        output,
        "{}",
        dim(format!(
            "{} projects, {} environments · collected {}",
            dashboard.projects.len(),
            environment_count,
            format_timestamp(dashboard.collected_at, &Local)
        ))
    );

    output
}

fn render_project(output: &mut String, project: &ProjectRow, now: DateTime<Utc>) {
    let _ = writeln!(
        output,
        "{} {}",
        bright("📦"),
        bright(format!(
            "{} (id: {})",
            project.name_with_namespace, project.id
        ))
        .underlined()
    );
    let _ = writeln!(output, "   {}", dim(&project.web_url));

    let mut table = create_table();
    table.set_header(cyan_header(&COLUMNS));
    for environment in &project.environments {
        table.add_row(environment_cells(environment, now));
    }

    let _ = writeln!(output, "{table}\n");
}

fn environment_cells(environment: &EnvironmentRow, now: DateTime<Utc>) -> Vec<Cell> {
    let mut name = capitalize(&environment.name);
    if let Some(url) = &environment.external_url {
        let _ = write!(name, "\n{url}");
    }

    let mut cells = vec![Cell::new(name)];
    match &environment.deployment {
        Some(deployment) => cells.extend(deployment_cells(deployment, now)),
        None => cells.extend((1..COLUMNS.len()).map(|_| empty_cell())),
    }
    cells
}

fn deployment_cells(deployment: &DeploymentSummary, now: DateTime<Utc>) -> Vec<Cell> {
    let deployed = match deployment.finished_at {
        Some(finished_at) => color_coded_age_cell(
            format!(
                "{}\n{}h",
                relative_time(finished_at, now),
                format_timestamp(finished_at, &Local)
            ),
            finished_at,
            now,
        ),
        None => empty_cell(),
    };

    let commit = deployment.commit.as_ref().map_or_else(empty_cell, |c| {
        Cell::new(format!("{}\nAuthor: {}", c.short_id, c.author_name))
    });

    let user = deployment
        .triggered_by
        .as_ref()
        .map_or_else(empty_cell, |u| Cell::new(&u.name));

    vec![Cell::new(&deployment.ref_), deployed, commit, user]
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_timestamp<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%d.%m.%Y %H:%M").to_string()
}

/// Human-friendly distance between `then` and `now`, e.g. "3 hours ago".
fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let past = seconds >= 0;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let round = |value: i64, unit: i64| (value as f64 / unit as f64).round() as i64;

    let seconds = seconds.abs();
    let minutes = round(seconds, 60);
    let hours = round(seconds, 3600);
    let days = round(seconds, 86_400);

    let distance = if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{hours} hours")
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        format!("{days} days")
    } else if days < 45 {
        "a month".to_string()
    } else if days < 320 {
        format!("{} months", round(days, 30).max(2))
    } else if days < 548 {
        "a year".to_string()
    } else {
        format!("{} years", round(days, 365).max(2))
    };

    if past {
        format!("{distance} ago")
    } else {
        format!("in {distance}")
    }
}
