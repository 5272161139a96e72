//! Interactive tie-breaking between groups that share a display name.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{KeyshareError, Result};
use crate::group::{GroupName, GroupRecord};

/// Line-oriented interactive input and output.
#[async_trait]
pub trait LineSource: Send {
    /// Show informational text to the user.
    fn show(&mut self, text: &str);

    /// Show `prompt` and wait for one line. `Ok(None)` means the stream closed.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// Picks one record among several that share a name.
#[async_trait]
pub trait Disambiguator: Send {
    /// Zero-based index into `candidates` of the user's choice.
    ///
    /// Fails with `KeyshareError::UserCancelled` if input ends first.
    async fn choose(&mut self, name: &GroupName, candidates: &[GroupRecord]) -> Result<usize>;
}

/// Renders the candidate list shown before asking for a choice.
pub type CandidateRenderer = fn(&GroupName, &[GroupRecord]) -> String;

/// Parse a 1-based menu choice, returning the 0-based index when it falls in `[1, count]`.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(choice) if choice >= 1 && choice <= count => Some(choice - 1),
        _ => None,
    }
}

/// Plain-text candidate listing, one numbered line per record.
pub fn render_candidates_plain(name: &GroupName, candidates: &[GroupRecord]) -> String {
    let mut lines = vec![format!(
        "Multiple groups found with the provided name '{}', which one do you want to use?",
        name
    )];
    for (index, group) in candidates.iter().enumerate() {
        lines.push(format!(
            "{}) {} admin={} member={} created={} updated={}",
            index + 1,
            group.id,
            group.is_admin,
            group.is_member,
            group.created.format("%Y-%m-%d"),
            group.updated.format("%Y-%m-%d"),
        ));
    }
    lines.join("\n")
}

/// Disambiguator that asks on a [`LineSource`] until it gets a valid number.
///
/// Invalid input re-prompts without limit; only a closed stream ends the loop.
pub struct ChoicePrompter<S> {
    source: S,
    render: CandidateRenderer,
}

impl<S: LineSource> ChoicePrompter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            render: render_candidates_plain,
        }
    }

    /// Use a different candidate presentation (e.g. a styled table).
    pub fn with_renderer(mut self, render: CandidateRenderer) -> Self {
        self.render = render;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The underlying line source, for follow-up prompts on the same stream.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

#[async_trait]
impl<S: LineSource> Disambiguator for ChoicePrompter<S> {
    async fn choose(&mut self, name: &GroupName, candidates: &[GroupRecord]) -> Result<usize> {
        let count = candidates.len();
        self.source.show(&(self.render)(name, candidates));

        let prompt = format!("Enter a choice (1 - {})", count);
        loop {
            let line = match self.source.read_line(&prompt).await {
                Ok(Some(line)) => line,
                Ok(None) => return Err(KeyshareError::UserCancelled),
                Err(err) => {
                    debug!(error = %err, "prompt input interrupted");
                    return Err(KeyshareError::UserCancelled);
                }
            };
            match parse_choice(&line, count) {
                Some(index) => {
                    debug!(group = %name, choice = index + 1, "disambiguated group name");
                    return Ok(index);
                }
                None => self.source.show("Invalid option, please try again."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 2), Some(0));
        assert_eq!(parse_choice(" 2\n", 2), Some(1));
        assert_eq!(parse_choice("0", 2), None);
        assert_eq!(parse_choice("3", 2), None);
        assert_eq!(parse_choice("-1", 2), None);
        assert_eq!(parse_choice("one", 2), None);
        assert_eq!(parse_choice("", 2), None);
    }

    #[test]
    fn test_plain_render_numbers_from_one() {
        use crate::group::GroupId;
        use chrono::Utc;

        let now = Utc::now();
        let candidates = vec![
            GroupRecord {
                id: GroupId::new("gid2"),
                name: Some(GroupName::new("dup")),
                is_admin: true,
                is_member: false,
                created: now,
                updated: now,
            },
            GroupRecord {
                id: GroupId::new("gid3"),
                name: Some(GroupName::new("dup")),
                is_admin: false,
                is_member: true,
                created: now,
                updated: now,
            },
        ];
        let text = render_candidates_plain(&GroupName::new("dup"), &candidates);
        assert!(text.contains("'dup'"));
        assert!(text.contains("1) gid2 admin=true"));
        assert!(text.contains("2) gid3 admin=false"));
    }
}
