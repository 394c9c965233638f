use aura::ProfileSummary;

pub(crate) fn roast_prompt(summary: &ProfileSummary) -> String {
    format!(
        r#"Generate a funny, sarcastic Gen-Z style roast (1-2 sentences max) about a GitHub programmer based on these stats:
- Main language: {}
- Total repositories: {}
- Total commits: {}
- Commit frequency: {} {}
- Followers: {}
- Account age: {} days

Make it:
- Use current Gen-Z slang
- Funny but not mean-spirited
- Relate to programming culture
- Maximum 2 sentences
- Include emoji if appropriate

Examples:
"Bruh, your commit messages are giving 'fixed stuff' energy 💀"
"Not you using tabs like it's 1995... we need to have a talk 😬""#,
        summary.main_language.as_deref().unwrap_or("None"),
        summary.repo_count,
        summary.commit_count,
        summary.commit_frequency,
        summary.commit_frequency.emoji(),
        summary.followers,
        summary.account_age_days
    )
}
