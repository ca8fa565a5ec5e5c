//! HTML rendering for the journal pages.

use std::fmt::Write;

use crate::recommend::Recommendation;
use crate::streak::LeaderboardRow;
use crate::timeline::MoodEntry;

/// Everything the journal page shows.
#[derive(Debug)]
pub struct IndexView<'a> {
    pub recommendation: Option<&'a Recommendation>,
    pub timeline: &'a [MoodEntry],
    pub leaderboard: &'a [LeaderboardRow],
    /// Echoed back into the textarea.
    pub mood_text: &'a str,
    pub mock_mode: bool,
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header class="topbar">
    <a class="brand" href="/">FeelBuddy</a>
    <nav><a href="/">Journal</a> <a href="/puzzle">Daily puzzle</a></nav>
  </header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn render_form(mood_text: &str, mock_mode: bool) -> String {
    let checked = if mock_mode { " checked" } else { "" };
    format!(
        r#"    <section class="card">
      <h1>How are you feeling today?</h1>
      <form method="post" action="/analyze">
        <textarea name="mood_text" rows="5" placeholder="Write a few lines about your day...">{text}</textarea>
        <label class="mock"><input type="checkbox" name="mock_mode" value="on"{checked}> Mock mode</label>
        <div class="actions">
          <button type="submit" name="action" value="analyze">Analyze</button>
          <button type="submit" name="action" value="mock" class="secondary">Try without writing</button>
        </div>
      </form>
    </section>
"#,
        text = escape_html(mood_text),
    )
}

fn render_recommendation(rec: &Recommendation) -> String {
    let mut songs = String::new();
    if rec.songs.is_empty() {
        songs.push_str("        <p class=\"muted\">No song suggestions available right now.</p>\n");
    } else {
        songs.push_str("        <ol class=\"songs\">\n");
        for track in &rec.songs {
            let title = escape_html(&track.title);
            let title = match &track.url {
                Some(url) => format!("<a href=\"{}\">{title}</a>", escape_html(url)),
                None => title,
            };
            let _ = writeln!(
                songs,
                "          <li>{title} <span class=\"muted\">by {}</span></li>",
                escape_html(&track.artist)
            );
        }
        songs.push_str("        </ol>\n");
    }

    format!(
        r#"    <section class="card recommendation">
      <h2>Your mood: <span class="badge mood-{mood}">{mood}</span> <span class="badge sentiment-{sentiment}">{sentiment}</span></h2>
      <div class="columns">
        <div>
          <h3>Songs</h3>
{songs}        </div>
        <div>
          <h3>Book</h3>
          <p class="book">{book}</p>
        </div>
      </div>
    </section>
"#,
        mood = rec.mood_tag,
        sentiment = rec.sentiment,
        book = escape_html(&rec.book),
    )
}

fn render_timeline(entries: &[MoodEntry]) -> String {
    let mut rows = String::new();
    for entry in entries {
        let _ = writeln!(
            rows,
            "          <tr><td class=\"date\">{}</td><td>{}</td><td><span class=\"badge mood-{mood}\">{mood}</span></td></tr>",
            escape_html(&entry.date),
            escape_html(&entry.text),
            mood = entry.mood,
        );
    }
    if entries.is_empty() {
        rows.push_str("          <tr><td colspan=\"3\" class=\"muted\">No entries yet.</td></tr>\n");
    }

    format!(
        r#"      <div class="card">
        <h2>Mood timeline</h2>
        <table class="timeline">
          <thead><tr><th>When</th><th>Entry</th><th>Mood</th></tr></thead>
          <tbody>
{rows}          </tbody>
        </table>
      </div>
"#
    )
}

fn render_leaderboard(rows: &[LeaderboardRow]) -> String {
    let mut body = String::new();
    for (rank, row) in rows.iter().enumerate() {
        let days = if row.streak == 1 { "day" } else { "days" };
        let _ = writeln!(
            body,
            "          <tr><td>{}</td><td>{}</td><td>{} {days}</td></tr>",
            rank + 1,
            escape_html(&row.user),
            row.streak,
        );
    }
    if rows.is_empty() {
        body.push_str(
            "          <tr><td colspan=\"3\" class=\"muted\">Play the daily puzzle to start a streak.</td></tr>\n",
        );
    }

    format!(
        r#"      <div class="card">
        <h2>Streak leaderboard</h2>
        <table class="leaderboard">
          <thead><tr><th>#</th><th>Player</th><th>Streak</th></tr></thead>
          <tbody>
{body}          </tbody>
        </table>
        <p><a href="/puzzle">Play today's puzzle</a></p>
      </div>
"#
    )
}

/// Render the journal page.
#[must_use]
pub fn render_index(view: &IndexView<'_>) -> String {
    let mut body = render_form(view.mood_text, view.mock_mode);
    if let Some(rec) = view.recommendation {
        body.push_str(&render_recommendation(rec));
    }
    body.push_str("    <section class=\"columns\">\n");
    body.push_str(&render_timeline(view.timeline));
    body.push_str(&render_leaderboard(view.leaderboard));
    body.push_str("    </section>\n");

    layout("FeelBuddy - mood journal", &body)
}

/// Generic failure page; details stay in the log.
#[must_use]
pub fn render_error_page() -> String {
    layout(
        "FeelBuddy - something went wrong",
        "    <section class=\"card\">\n      <h1>Something went wrong</h1>\n      <p>Please try again in a moment.</p>\n    </section>\n",
    )
}
