//! Help centre.

const FAQ: [(&str, &str); 5] = [
    (
        "How do I search for blogs?",
        "Run `search <keywords>` to find posts by title, description or tag. Add `--pick N` to open the N-th result.",
    ),
    (
        "How do I add blogs to favorites?",
        "Run `favorite <slug>`; running it again removes the blog. `favorites` lists everything you saved.",
    ),
    (
        "Can I customize my reading experience?",
        "Yes! Use `settings --theme <name> --mode light|dark|system`. Choices are kept between sessions.",
    ),
    (
        "How do I use the calendar feature?",
        "`calendar --view month|week|day --date YYYY-MM-DD` shows publication dates and events; `--shift` moves by whole periods.",
    ),
    (
        "Is my data secure?",
        "Favorites, settings and saved comments live in a local file and are never shared with third parties.",
    ),
];

const GUIDES: [(&str, &str); 5] = [
    ("Getting Started", "home, blog <slug>, open <route>"),
    ("Search Guide", "search <query> [--pick N], tags [slug]"),
    ("Blog Management", "favorite <slug>, vote <slug> up|down|clear, comment <slug>"),
    ("Calendar Features", "calendar [--view] [--date] [--shift]"),
    ("AI Features", "ask <question>"),
];

pub fn render() -> String {
    let mut out = String::from(
        "Help Center\nFind answers to common questions and learn how to use the reader\n\n",
    );

    out.push_str("Quick links\n");
    for (title, commands) in GUIDES {
        out.push_str(&format!("- {title}: {commands}\n"));
    }

    out.push_str("\nFrequently asked questions\n");
    for (question, answer) in FAQ {
        out.push_str(&format!("\nQ: {question}\nA: {answer}\n"));
    }
    out
}
