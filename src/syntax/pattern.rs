//! Token recognition rules.
//!
//! A [`Pattern`] classifies a single whitespace-delimited word as a token.
//! Patterns are tried in declaration order; the first whose regex matches the
//! word and whose skip predicate (if any) does not veto the word's position
//! wins. Case sensitivity is owned by the regex itself (inline `(?i)`), not
//! by the matching engine.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

/// Builds the presentation-side widget for a recognized token.
///
/// The engine never invokes the factory itself; it is carried on
/// [`Segment::Token`](super::Segment) entries so the host can materialize a
/// tag view per token. `V` is whatever view handle the host works with.
pub type TokenFactory<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Disqualifies a pattern at a given word position.
///
/// Receives the word index and all words of the line; returning `true` means
/// "skip this pattern here" (e.g. recognize a keyword only at line start).
pub type SkipPredicate = Arc<dyn Fn(usize, &[&str]) -> bool + Send + Sync>;

/// Error compiling a token rule into a [`Pattern`].
#[derive(Debug, Error)]
#[error("invalid token pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// A single token recognition rule: regex + view factory + optional skip rule.
pub struct Pattern<V> {
    regex: Regex,
    factory: TokenFactory<V>,
    skip_when: Option<SkipPredicate>,
}

impl<V> Pattern<V> {
    /// Compile a pattern without a skip rule.
    pub fn new(
        pattern: &str,
        factory: impl Fn() -> V + Send + Sync + 'static,
    ) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            factory: Arc::new(factory),
            skip_when: None,
        })
    }

    /// Compile a pattern with a positional skip rule.
    pub fn with_skip(
        pattern: &str,
        factory: impl Fn() -> V + Send + Sync + 'static,
        skip_when: impl Fn(usize, &[&str]) -> bool + Send + Sync + 'static,
    ) -> Result<Self, PatternError> {
        let mut this = Self::new(pattern, factory)?;
        this.skip_when = Some(Arc::new(skip_when));
        Ok(this)
    }

    /// Whether the regex matches anywhere in `word`.
    pub fn is_match(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }

    /// A cloned handle to the token view factory.
    pub fn factory(&self) -> TokenFactory<V> {
        Arc::clone(&self.factory)
    }

    fn applies(&self, index: usize, words: &[&str]) -> bool {
        match &self.skip_when {
            Some(skip) => !skip(index, words),
            None => true,
        }
    }
}

impl<V> Clone for Pattern<V> {
    fn clone(&self) -> Self {
        Self {
            regex: self.regex.clone(),
            factory: Arc::clone(&self.factory),
            skip_when: self.skip_when.clone(),
        }
    }
}

impl<V> fmt::Debug for Pattern<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("regex", &self.regex.as_str())
            .field("skip_when", &self.skip_when.is_some())
            .finish()
    }
}

/// Diagram-script keywords recognized at the beginning of a line.
pub const LINE_BEGIN_KEYWORDS: &str = r"(?i)^\s*(usecase|actor|object|participant|boundary|control|entity|database|create|component|interface|package|node|folder|frame|cloud|annotation|enum|abstract|class|abstract\s+class|state|autonumber(\s+stop|resume)?|activate|deactivate|destroy|newpage|alt|else|opt|loop|par|break|critical|group|box|rectangle|namespace|partition|archimate|sprite|left|right|side|top|bottom)\b";

/// Ordered list of token recognition rules.
pub struct PatternSet<V> {
    patterns: Vec<Pattern<V>>,
}

impl<V> Clone for PatternSet<V> {
    fn clone(&self) -> Self {
        Self {
            patterns: self.patterns.clone(),
        }
    }
}

impl<V> fmt::Debug for PatternSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSet")
            .field("patterns", &self.patterns)
            .finish()
    }
}

impl<V> Default for PatternSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PatternSet<V> {
    /// An empty set: every word is ordinary text.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn from_patterns(patterns: Vec<Pattern<V>>) -> Self {
        Self { patterns }
    }

    /// The built-in diagram-keyword rule set: [`LINE_BEGIN_KEYWORDS`],
    /// recognized only when the keyword is the first word of the line.
    pub fn line_begin_keywords(factory: impl Fn() -> V + Send + Sync + 'static) -> Self {
        let pattern = Pattern::with_skip(LINE_BEGIN_KEYWORDS, factory, |index, _| index > 0)
            .expect("built-in keyword pattern compiles");
        Self {
            patterns: vec![pattern],
        }
    }

    pub fn push(&mut self, pattern: Pattern<V>) {
        self.patterns.push(pattern);
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// First pattern (in declaration order) matching `word` at `index`.
    ///
    /// A pattern whose skip predicate returns `true` for this position is
    /// not considered at all.
    pub fn matches(&self, word: &str, index: usize, words: &[&str]) -> Option<&Pattern<V>> {
        self.patterns
            .iter()
            .filter(|p| p.applies(index, words))
            .find(|p| p.is_match(word))
    }

    /// Whether any whitespace-delimited word of `text` matches any pattern.
    ///
    /// Skip predicates are deliberately not consulted here; this is a cheap
    /// pre-check and the full parse makes the final call.
    pub fn matches_any_word(&self, text: &str) -> bool {
        text.split(' ')
            .any(|word| self.patterns.iter().any(|p| p.is_match(word)))
    }
}
