//! Picks the best candidate for a `Title - Artist` query.
//!
//! Matching is case-insensitive substring containment in either direction, so
//! suffixes like "(Remastered)" or "feat. X" still match without any
//! normalization. Every string contains the empty string: an empty target or
//! candidate value matches anything.

/// Anything a backend returns that has a title and an artist.
pub trait Candidate {
    fn name(&self) -> &str;
    fn artist(&self) -> &str;
}

/// Which pass accepted the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    TitleAndArtist,
    ArtistOnly,
    /// Nothing matched; the backend's top result was taken.
    FirstResult,
}

#[derive(Debug, Clone, Copy)]
pub struct BestMatch<'a, C> {
    pub candidate: &'a C,
    pub tier: MatchTier,
}

pub fn contains_either_way(candidate_value: &str, target: &str) -> bool {
    let candidate_value = candidate_value.to_lowercase();
    let target = target.to_lowercase();
    candidate_value.contains(&target) || target.contains(&candidate_value)
}

/// Returns `None` only when `candidates` is empty.
pub fn best_match<'a, C: Candidate>(
    candidates: &'a [C],
    target_title: &str,
    target_artist: &str,
) -> Option<BestMatch<'a, C>> {
    let first = candidates.first()?;

    if let Some(candidate) = candidates.iter().find(|c| {
        contains_either_way(c.artist(), target_artist)
            && contains_either_way(c.name(), target_title)
    }) {
        return Some(BestMatch {
            candidate,
            tier: MatchTier::TitleAndArtist,
        });
    }

    if let Some(candidate) = artist_match(candidates, target_artist) {
        return Some(BestMatch {
            candidate,
            tier: MatchTier::ArtistOnly,
        });
    }

    Some(BestMatch {
        candidate: first,
        tier: MatchTier::FirstResult,
    })
}

/// First candidate whose artist matches, with no fallback.
pub fn artist_match<'a, C: Candidate>(candidates: &'a [C], target_artist: &str) -> Option<&'a C> {
    candidates
        .iter()
        .find(|c| contains_either_way(c.artist(), target_artist))
}
