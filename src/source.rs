use core::{fmt, num::NonZeroUsize};
use std::{fs, io, path::Path, sync::Arc};

/// Contains metadata for an input text.
///
/// This internally stores an [`Arc`], hence it is *cheap* to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source(Arc<SourceInner>);

impl Source {
  /// Creates a new [`Source`].
  pub fn new<N, S>(name: N, source: S) -> Self
  where
    N: Into<String>,
    S: Into<String>,
  {
    let name = name.into();
    let source = source.into();
    let line_starts = core::iter::once(0)
      .chain(
        source
          .char_indices()
          .filter(|&(_, c)| c == '\n')
          .map(|(i, _)| i + 1),
      )
      .collect::<Vec<_>>();

    Self(Arc::new(SourceInner {
      name,
      source,
      line_starts,
    }))
  }

  /// Creates a new [`Source`] from the contents read from a file.
  pub fn from_path<P>(path: P) -> io::Result<Self>
  where
    P: AsRef<Path>,
  {
    let source = fs::read_to_string(&path)?;
    let name = path.as_ref().to_string_lossy().into_owned();

    Ok(Self::new(name, source))
  }

  /// Returns the name as a <code>&[str]</code>.
  #[inline]
  #[must_use]
  pub fn name(&self) -> &str {
    self.0.name.as_str()
  }

  /// Returns the source as a <code>&[str]</code>.
  #[inline]
  #[must_use]
  pub fn source(&self) -> &str {
    self.0.source.as_str()
  }

  /// Returns the [`Location`] calculated from a byte index.
  ///
  /// [`None`] is returned when `index` is out-of-bounds, or `index` is not on
  /// UTF-8 sequence boundaries.
  ///
  /// This internally uses a binary search.
  #[must_use]
  pub fn location(&self, index: usize) -> Option<Location> {
    if index > self.0.source.len() {
      return None;
    }

    let line = match self.0.line_starts.binary_search(&index) {
      Ok(x) => x,
      Err(x) => x - 1,
    };

    let line_start = self.0.line_starts[line];
    let column = self.0.source.get(line_start..index)?.chars().count();

    Some(Location {
      line: NonZeroUsize::new(line + 1).unwrap(),
      column: NonZeroUsize::new(column + 1).unwrap(),
    })
  }
}

#[derive(Debug, PartialEq, Eq)]
struct SourceInner {
  name: String,
  source: String,
  line_starts: Vec<usize>,
}

/// A human-readable location in a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
  /// The line number.
  pub line: NonZeroUsize,
  /// The column number.
  pub column: NonZeroUsize,
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}
