//! Executable resolution over the search path.

use crate::rule::ExecutableRule;
use crate::scan::{self, DirScan};
use crate::{
    CwdMode, Error, ExecutableEntry, Filter, Platform, ResolveOptions, Result, SearchPath,
};
use async_stream::try_stream;
use futures::{pin_mut, Stream, TryStreamExt};
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolution engine bound to one environment snapshot.
///
/// The snapshot (search path and executability rule) is immutable: every
/// call made through the same `Resolver` sees the same environment, however
/// the process environment changes meanwhile. Nothing else is retained
/// between calls.
///
/// # Example
///
/// ```rust
/// use executable_discovery::{PosixRule, ResolveOptions, Resolver, SearchPath};
/// use std::sync::Arc;
///
/// let resolver = Resolver::new(
///     SearchPath::new(["/usr/local/bin", "/usr/bin"]),
///     Arc::new(PosixRule::new(1000, 1000)),
/// );
/// for entry in resolver.resolve_all(&ResolveOptions::default()).unwrap() {
///     match entry {
///         Ok(entry) => println!("{}", entry.path.display()),
///         Err(e) => eprintln!("resolution failed: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    search_path: SearchPath,
    rule: Arc<dyn ExecutableRule>,
}

impl Resolver {
    /// Bind an explicit search path and rule.
    pub fn new(search_path: SearchPath, rule: Arc<dyn ExecutableRule>) -> Self {
        Self { search_path, rule }
    }

    /// Snapshot `PATH` and the current platform's rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnresolvedIdentity`] when the POSIX identity is
    /// unavailable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            SearchPath::from_env(),
            Platform::current().rule_from_env()?,
        ))
    }

    /// The bound search path.
    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// The bound executability rule.
    pub fn rule(&self) -> &dyn ExecutableRule {
        self.rule.as_ref()
    }

    /// Lazily yield every executable accepted by `options`.
    ///
    /// Directories are scanned in order (working directory first when
    /// requested), members in listing order. A path reachable through two
    /// search entries is yielded once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CurrentDir`] up front if [`CwdMode::Current`] is
    /// requested and the working directory is unavailable. Later fatal I/O
    /// errors are yielded as the iterator's last item.
    pub fn resolve_all(&self, options: &ResolveOptions) -> Result<ExecutableIter> {
        Ok(ExecutableIter {
            rule: Arc::clone(&self.rule),
            dirs: self.search_dirs(&options.cwd)?.into_iter(),
            current: None,
            admission: Admission::new(options),
            failed: false,
        })
    }

    /// The first executable named `name`, stopping the scan at that match.
    ///
    /// `options.filters` is replaced by an exact filter on `name`.
    pub fn resolve_first(
        &self,
        name: &str,
        options: &ResolveOptions,
    ) -> Result<Option<ExecutableEntry>> {
        self.resolve_all(&first_options(name, options))?
            .next()
            .transpose()
    }

    /// Non-blocking form of [`Resolver::resolve_all`].
    ///
    /// Directory listing and per-entry status lookups are the only suspension
    /// points; ordering, dedup and filtering are identical.
    pub fn resolve_all_async(
        &self,
        options: &ResolveOptions,
    ) -> Result<impl Stream<Item = Result<ExecutableEntry>> + Send + 'static> {
        let rule = Arc::clone(&self.rule);
        let dirs = self.search_dirs(&options.cwd)?;
        let mut admission = Admission::new(options);

        Ok(try_stream! {
            for dir in dirs {
                let Some(mut entries) = scan::open_async(&dir).await? else {
                    continue;
                };
                loop {
                    let entry = match entries.next_entry().await {
                        Ok(Some(entry)) => entry,
                        Ok(None) => break,
                        Err(error) => {
                            scan::skip_directory(&dir, error)?;
                            break;
                        }
                    };
                    let path = entry.path();
                    let metadata = tokio::fs::metadata(&path).await;
                    let candidate =
                        scan::classify(rule.as_ref(), &entry.file_name(), path, metadata);
                    if let Some(found) = candidate.and_then(|c| admission.admit(c)) {
                        yield found;
                    }
                }
            }
        })
    }

    /// Non-blocking form of [`Resolver::resolve_first`].
    pub async fn resolve_first_async(
        &self,
        name: &str,
        options: &ResolveOptions,
    ) -> Result<Option<ExecutableEntry>> {
        let stream = self.resolve_all_async(&first_options(name, options))?;
        pin_mut!(stream);
        stream.try_next().await
    }

    fn search_dirs(&self, cwd: &CwdMode) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::with_capacity(self.search_path.len() + 1);
        match cwd {
            CwdMode::Exclude => {}
            CwdMode::Current => dirs.push(std::env::current_dir().map_err(Error::CurrentDir)?),
            CwdMode::Dir(dir) => dirs.push(dir.clone()),
        }
        dirs.extend(self.search_path.iter().cloned());
        dirs.retain(|dir| {
            let absolute = dir.is_absolute();
            if !absolute {
                debug!(dir = %dir.display(), "ignoring relative search directory");
            }
            absolute
        });
        Ok(dirs)
    }
}

fn first_options(name: &str, options: &ResolveOptions) -> ResolveOptions {
    ResolveOptions {
        cwd: options.cwd.clone(),
        filters: vec![Filter::exact(name)],
    }
}

/// Seen-set and filters of one resolution call.
#[derive(Debug)]
struct Admission {
    seen: HashSet<PathBuf>,
    filters: Vec<Filter>,
}

impl Admission {
    fn new(options: &ResolveOptions) -> Self {
        Self {
            seen: HashSet::new(),
            filters: options.filters.clone(),
        }
    }

    fn admit(&mut self, candidate: ExecutableEntry) -> Option<ExecutableEntry> {
        if self.seen.contains(&candidate.path) || !Filter::any_matches(&self.filters, &candidate) {
            return None;
        }
        self.seen.insert(candidate.path.clone());
        Some(candidate)
    }
}

/// Blocking, pull-driven sequence of resolved executables.
///
/// Returned by [`Resolver::resolve_all`] and [`resolve_all`]. Holds at most
/// one open directory; dropping the iterator early releases it. After a
/// fatal error is yielded the iterator is exhausted.
#[derive(Debug)]
pub struct ExecutableIter {
    rule: Arc<dyn ExecutableRule>,
    dirs: std::vec::IntoIter<PathBuf>,
    current: Option<DirScan>,
    admission: Admission,
    failed: bool,
}

impl Iterator for ExecutableIter {
    type Item = Result<ExecutableEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(scan) = self.current.as_mut() {
                match scan.next_candidate(self.rule.as_ref()) {
                    Ok(Some(candidate)) => {
                        if let Some(found) = self.admission.admit(candidate) {
                            return Some(Ok(found));
                        }
                        continue;
                    }
                    Ok(None) => self.current = None,
                    Err(error) => return Some(Err(self.fail(error))),
                }
            }

            let dir = self.dirs.next()?;
            match DirScan::open(dir) {
                Ok(scan) => self.current = scan,
                Err(error) => return Some(Err(self.fail(error))),
            }
        }
    }
}

impl FusedIterator for ExecutableIter {}

impl ExecutableIter {
    fn fail(&mut self, error: Error) -> Error {
        self.failed = true;
        self.current = None;
        error
    }
}

/// Lazily yield every executable on `PATH` accepted by `options`.
///
/// Captures the environment once, then behaves like
/// [`Resolver::resolve_all`].
///
/// # Example
///
/// ```rust,no_run
/// use executable_discovery::{resolve_all, Filter, ResolveOptions};
///
/// let options = ResolveOptions {
///     filters: vec![Filter::pattern("^cargo-").unwrap()],
///     ..Default::default()
/// };
/// for entry in resolve_all(&options).unwrap() {
///     println!("{}", entry.unwrap().name);
/// }
/// ```
pub fn resolve_all(options: &ResolveOptions) -> Result<ExecutableIter> {
    Resolver::from_env()?.resolve_all(options)
}

/// The first executable on `PATH` named `name`.
///
/// # Example
///
/// ```rust,no_run
/// use executable_discovery::{resolve_first, ResolveOptions};
///
/// match resolve_first("git", &ResolveOptions::default()).unwrap() {
///     Some(git) => println!("git is {}", git.path.display()),
///     None => println!("git is not installed"),
/// }
/// ```
pub fn resolve_first(name: &str, options: &ResolveOptions) -> Result<Option<ExecutableEntry>> {
    Resolver::from_env()?.resolve_first(name, options)
}

/// Non-blocking form of [`resolve_all`].
///
/// # Example
///
/// ```rust,no_run
/// use executable_discovery::{resolve_all_async, ResolveOptions};
/// use futures::TryStreamExt;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let stream = resolve_all_async(&ResolveOptions::default()).unwrap();
///     let all: Vec<_> = stream.try_collect().await.unwrap();
///     println!("{} executables on PATH", all.len());
/// }
/// ```
pub fn resolve_all_async(
    options: &ResolveOptions,
) -> Result<impl Stream<Item = Result<ExecutableEntry>> + Send + 'static> {
    Resolver::from_env()?.resolve_all_async(options)
}

/// Non-blocking form of [`resolve_first`].
pub async fn resolve_first_async(
    name: &str,
    options: &ResolveOptions,
) -> Result<Option<ExecutableEntry>> {
    Resolver::from_env()?
        .resolve_first_async(name, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExtensionList, WindowsRule};
    use std::path::Path;

    fn windows_resolver(dirs: &[&Path]) -> Resolver {
        Resolver::new(
            SearchPath::new(dirs.iter().copied()),
            Arc::new(WindowsRule::new(&ExtensionList::new([".EXE", ".BAT"]))),
        )
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_first_match_wins_across_directories() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let expected = touch(a.path(), "foo.exe");
        touch(b.path(), "foo.exe");

        let resolver = windows_resolver(&[a.path(), b.path()]);
        let found = resolver
            .resolve_first("foo", &ResolveOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(found.path, expected);
        assert_eq!(found.name, "foo");
        assert_eq!(found.basename, "foo.exe");
    }

    #[test]
    fn test_explicit_cwd_is_deduplicated() {
        let a = tempfile::tempdir().unwrap();
        touch(a.path(), "foo.exe");

        let resolver = windows_resolver(&[a.path()]);
        let options = ResolveOptions {
            cwd: CwdMode::Dir(a.path().to_path_buf()),
            ..Default::default()
        };
        let all: Vec<_> = resolver
            .resolve_all(&options)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_cwd_is_scanned_first() {
        let cwd = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let expected = touch(cwd.path(), "foo.exe");
        touch(other.path(), "foo.exe");

        let resolver = windows_resolver(&[other.path()]);
        let options = ResolveOptions {
            cwd: CwdMode::Dir(cwd.path().to_path_buf()),
            ..Default::default()
        };
        let found = resolver.resolve_first("foo", &options).unwrap().unwrap();
        assert_eq!(found.path, expected);
    }

    #[test]
    fn test_relative_entries_are_ignored() {
        let resolver = Resolver::new(
            SearchPath::new(["relative/bin", "bin"]),
            Arc::new(WindowsRule::new(&ExtensionList::default())),
        );
        let all: Vec<_> = resolver
            .resolve_all(&ResolveOptions::default())
            .unwrap()
            .collect();
        assert!(all.is_empty());
    }

    #[test]
    fn test_resolve_first_replaces_filters() {
        let a = tempfile::tempdir().unwrap();
        touch(a.path(), "foo.exe");

        let resolver = windows_resolver(&[a.path()]);
        let options = ResolveOptions {
            filters: vec![Filter::exact("bar")],
            ..Default::default()
        };
        assert!(resolver.resolve_first("foo", &options).unwrap().is_some());
    }

    #[test]
    fn test_resolve_first_not_found() {
        let a = tempfile::tempdir().unwrap();
        touch(a.path(), "foo.exe");

        let resolver = windows_resolver(&[a.path()]);
        let found = resolver
            .resolve_first("missing", &ResolveOptions::default())
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_iterator_is_fused_after_exhaustion() {
        let resolver = windows_resolver(&[]);
        let mut iter = resolver.resolve_all(&ResolveOptions::default()).unwrap();
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_fail_marks_iterator_exhausted() {
        let resolver = windows_resolver(&[]);
        let mut iter = resolver.resolve_all(&ResolveOptions::default()).unwrap();
        let error = iter.fail(Error::UnresolvedIdentity { id: "user" });
        assert!(matches!(error, Error::UnresolvedIdentity { .. }));
        assert!(iter.next().is_none());
    }

    #[tokio::test]
    async fn test_async_first_match_wins() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let expected = touch(a.path(), "foo.exe");
        touch(b.path(), "foo.exe");

        let resolver = windows_resolver(&[a.path(), b.path()]);
        let found = resolver
            .resolve_first_async("foo", &ResolveOptions::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.path, expected);
    }

    #[tokio::test]
    async fn test_async_matches_blocking() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        for name in ["one.exe", "two.bat", "skip.txt", "TWO.BAT"] {
            touch(a.path(), name);
        }
        for name in ["one.exe", "three.EXE"] {
            touch(b.path(), name);
        }

        let resolver = windows_resolver(&[a.path(), b.path(), a.path()]);
        let options = ResolveOptions {
            cwd: CwdMode::Dir(b.path().to_path_buf()),
            ..Default::default()
        };

        let blocking: Vec<_> = resolver
            .resolve_all(&options)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let non_blocking: Vec<_> = resolver
            .resolve_all_async(&options)
            .unwrap()
            .try_collect()
            .await
            .unwrap();

        assert_eq!(blocking, non_blocking);
        let unique: HashSet<_> = blocking.iter().map(|e| e.path.clone()).collect();
        assert_eq!(unique.len(), blocking.len());
    }
}
