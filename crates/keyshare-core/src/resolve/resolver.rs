//! Turns user-typed group references into canonical group IDs.

use tracing::debug;

use super::cache::{GroupMaps, NameEntry, ResolutionCache};
use super::prompt::Disambiguator;
use crate::error::{KeyshareError, Result};
use crate::group::{GroupId, GroupName, GroupReference};
use crate::service::GroupDirectory;

/// What to do with a bare name that matches no group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedPolicy {
    /// Fail the whole resolution with `UnknownReference`.
    Fail,
    /// Pass the name through unchanged as if it were an ID, leaving the
    /// remote operation to report it.
    Echo,
}

/// Reference resolver owning the directory cache and the disambiguation prompter.
///
/// Construct one per process (or per request in a long-lived host); the cache
/// lives as long as the resolver.
pub struct Resolver<D, P> {
    directory: D,
    prompter: P,
    cache: ResolutionCache,
}

impl<D, P> Resolver<D, P>
where
    D: GroupDirectory,
    P: Disambiguator,
{
    pub fn new(directory: D, prompter: P) -> Self {
        Self {
            directory,
            prompter,
            cache: ResolutionCache::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// The cached directory, fetching it on first use.
    pub async fn groups(&mut self) -> Result<&GroupMaps> {
        self.cache.populate(&self.directory).await
    }

    /// Drop the cached directory so the next lookup fetches it again.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolve one reference, failing on unknown names.
    ///
    /// Escaped references (`id^...`) never touch the directory and are not
    /// checked for existence.
    pub async fn resolve(&mut self, reference: &GroupReference) -> Result<GroupId> {
        match self.lookup(reference).await? {
            Some(id) => Ok(id),
            None => Err(KeyshareError::UnknownReference(reference.value().to_string())),
        }
    }

    /// Resolve a list of references one after another, preserving input order.
    ///
    /// Resolution is strictly sequential: a disambiguation prompt for one
    /// reference finishes before the next reference is looked at.
    pub async fn resolve_many(
        &mut self,
        references: &[GroupReference],
        policy: UnresolvedPolicy,
    ) -> Result<Vec<GroupId>> {
        let mut resolved = Vec::with_capacity(references.len());
        for reference in references {
            match self.lookup(reference).await? {
                Some(id) => resolved.push(id),
                None => match policy {
                    UnresolvedPolicy::Fail => {
                        return Err(KeyshareError::UnknownReference(
                            reference.value().to_string(),
                        ))
                    }
                    UnresolvedPolicy::Echo => {
                        debug!(reference = %reference, "passing unresolved group name through");
                        resolved.push(GroupId::new(reference.value()));
                    }
                },
            }
        }
        Ok(resolved)
    }

    /// `Ok(None)` when a bare name has no match.
    async fn lookup(&mut self, reference: &GroupReference) -> Result<Option<GroupId>> {
        let name = match reference {
            GroupReference::Id(id) => {
                debug!(group_id = %id, "using escaped group id");
                return Ok(Some(id.clone()));
            }
            GroupReference::Name(name) => name,
        };

        let entry = self
            .cache
            .populate(&self.directory)
            .await
            .map_err(|e| KeyshareError::ReferenceLookupFailed {
                reference: name.to_string(),
                source: Box::new(e),
            })?
            .by_name(name)
            .cloned();

        match entry {
            None => Ok(None),
            Some(NameEntry::Single(record)) => {
                debug!(group = %name, group_id = %record.id, "resolved group name");
                Ok(Some(record.id))
            }
            Some(NameEntry::Multiple(records)) => {
                let index = self.prompter.choose(name, &records).await?;
                let chosen = records.get(index).ok_or_else(|| {
                    KeyshareError::InvalidInput(format!(
                        "Choice {} is out of range for group '{}'",
                        index + 1,
                        name
                    ))
                })?;
                Ok(Some(chosen.id.clone()))
            }
        }
    }

    /// Whether a group with `name` is already in the directory.
    pub async fn name_exists(&mut self, name: &GroupName) -> Result<bool> {
        Ok(self.groups().await?.contains_name(name))
    }
}
