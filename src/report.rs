use crate::activity::{DailyCount, busiest_day, daily_commit_counts};
use crate::stats::{
    Summary, TOP_CONTRIBUTORS, TOP_LANGUAGES, group_thousands, language_breakdown,
    top_contributors,
};
use crate::types::RepositoryStats;
use chrono::NaiveDate;

const MIN_ALIGN_WIDTH: usize = 40;
/// Commits listed under "Recent Commits".
const RECENT_COMMITS_SHOWN: usize = 10;
const ACTIVITY_BAR_MAX: usize = 30;

/// `key: ....... value`, padded with dots to `align_width`.
pub fn stat_row(key: &str, value: &str, align_width: usize) -> String {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => String::new(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    format!("{key_part}{dots}{value}")
}

fn header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count());
    format!("{base}{}", "-".repeat(dash_count))
}

fn activity_bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let len = (count * ACTIVITY_BAR_MAX).div_ceil(max);
    "#".repeat(len.max(1))
}

/// Plain-text dashboard for a terminal. `today` anchors the activity series.
pub fn render_text(stats: &RepositoryStats, today: NaiveDate, activity_days: u32) -> String {
    let summary = Summary::from_stats(stats);

    let headline: Vec<(&str, String)> = vec![
        ("Stars", group_thousands(summary.stars)),
        ("Forks", group_thousands(summary.forks)),
        ("Open Issues", group_thousands(summary.open_issues)),
        ("Language", summary.language.clone()),
        ("Created", summary.created.format("%b %d, %Y").to_string()),
        ("Last Updated", summary.updated.format("%b %d, %Y").to_string()),
        ("Default Branch", summary.default_branch.clone()),
        ("Owner", summary.owner.clone()),
    ];

    let align_width = headline
        .iter()
        .map(|(k, v)| k.len() + 2 + v.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_ALIGN_WIDTH);

    let mut out = Vec::new();
    out.push(header_line(&stats.repository.full_name, align_width));
    out.push(summary.description.clone());
    out.push(summary.html_url.clone());
    out.push(String::new());
    for (key, value) in &headline {
        out.push(stat_row(key, value, align_width));
    }

    out.push(String::new());
    out.push(header_line("Languages", align_width));
    let shares = language_breakdown(&stats.languages, TOP_LANGUAGES);
    if shares.is_empty() {
        out.push("No language data available".to_string());
    }
    for share in shares {
        out.push(stat_row(
            &share.name,
            &format!("{:.1}%", share.percentage),
            align_width,
        ));
    }

    out.push(String::new());
    out.push(header_line("Top Contributors", align_width));
    for contributor in top_contributors(&stats.contributors, TOP_CONTRIBUTORS) {
        out.push(stat_row(
            &contributor.login,
            &format!("{} contributions", group_thousands(contributor.contributions)),
            align_width,
        ));
    }

    out.push(String::new());
    out.push(header_line(
        &format!("Commit Activity (last {activity_days} days)"),
        align_width,
    ));
    let counts = daily_commit_counts(&stats.recent_commits, today, activity_days);
    out.extend(activity_lines(&counts));

    out.push(String::new());
    out.push(header_line("Recent Commits", align_width));
    for commit in stats.recent_commits.iter().take(RECENT_COMMITS_SHOWN) {
        out.push(format!(
            "{} {} ({}, {})",
            commit.short_sha(),
            commit.headline(),
            commit.author_name(),
            commit.commit.author.date.format("%b %d, %Y")
        ));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn activity_lines(counts: &[DailyCount]) -> Vec<String> {
    let max = counts.iter().map(|c| c.commits).max().unwrap_or(0);
    let mut lines: Vec<String> = counts
        .iter()
        .map(|c| {
            format!(
                "{} {:>4} {}",
                c.date.format("%b %d"),
                c.commits,
                activity_bar(c.commits, max)
            )
            .trim_end()
            .to_string()
        })
        .collect();

    if let Some(peak) = busiest_day(counts) {
        lines.push(format!(
            "Busiest day: {} ({} commits)",
            peak.date.format("%b %d"),
            peak.commits
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Account, Commit, CommitDetail, CommitSignature, CommitUser, Contributor, Repository,
    };
    use chrono::{TimeZone, Utc};

    #[test]
    fn stat_row_pads_with_dots() {
        assert_eq!(stat_row("Stars", "10", 20), "Stars: .......... 10");
        assert_eq!(stat_row("Stars", "10", 20).chars().count(), 20);
        assert_eq!(stat_row("Stars", "10", 11), "Stars: . 10");
        assert_eq!(stat_row("Stars", "10", 10), "Stars:  10");
        assert_eq!(stat_row("Stars", "10", 5), "Stars: 10");
    }

    #[test]
    fn header_fills_with_dashes() {
        assert_eq!(header_line("Languages", 15), "Languages -----");
    }

    #[test]
    fn bars_scale_to_busiest_day() {
        assert_eq!(activity_bar(0, 5), "");
        assert_eq!(activity_bar(5, 5).len(), ACTIVITY_BAR_MAX);
        assert_eq!(activity_bar(1, 1000), "#");
    }

    fn sample() -> RepositoryStats {
        let at = Utc.with_ymd_and_hms(2023, 2, 3, 0, 0, 0).unwrap();
        RepositoryStats {
            repository: Repository {
                id: 1,
                name: "demo".to_string(),
                full_name: "acme/demo".to_string(),
                description: None,
                html_url: "https://github.com/acme/demo".to_string(),
                stargazers_count: 12345,
                forks_count: 678,
                open_issues_count: 9,
                language: None,
                created_at: at,
                updated_at: at,
                pushed_at: at,
                default_branch: "main".to_string(),
                owner: Account {
                    login: "acme".to_string(),
                    avatar_url: String::new(),
                    html_url: String::new(),
                },
            },
            contributors: vec![Contributor {
                login: "alice".to_string(),
                id: 1,
                avatar_url: String::new(),
                contributions: 4321,
                html_url: String::new(),
            }],
            languages: [("Rust".to_string(), 3), ("Shell".to_string(), 1)]
                .into_iter()
                .collect(),
            recent_commits: vec![Commit {
                sha: "deadbeefcafe".to_string(),
                commit: CommitDetail {
                    message: "Add parser\n\ndetails".to_string(),
                    author: CommitSignature {
                        name: "Alice".to_string(),
                        date: Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap(),
                    },
                },
                author: Some(CommitUser {
                    login: "alice".to_string(),
                    avatar_url: String::new(),
                }),
            }],
        }
    }

    #[test]
    fn text_report_covers_every_section() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 3).unwrap();
        let text = render_text(&sample(), today, 3);

        assert!(text.starts_with("acme/demo ---"));
        assert!(text.contains("No description available"));
        assert!(text.contains("12,345"));
        assert!(text.contains("Language: "));
        assert!(text.ends_with("deadbee Add parser (alice, Apr 02, 2024)\n"));
        assert!(text.contains("Rust: "));
        assert!(text.contains("75.0%"));
        assert!(text.contains("4,321 contributions"));
        assert!(text.contains("Busiest day: Apr 02 (1 commits)"));
        assert!(text.contains("Created: "));
        assert!(text.contains("Feb 03, 2023"));
    }
}
