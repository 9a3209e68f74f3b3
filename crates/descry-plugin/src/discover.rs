//! Manifest-driven plugin discovery.
//!
//! The engine scans a base directory plus any locations named by an
//! environment variable (platform path-separator delimited) for plugin
//! candidates, resolves each candidate's manifest against a family's
//! export key, validates the exported names against the family's
//! [`PluginRegistry`], and aggregates the survivors into a name → factory
//! map.
//!
//! # Candidates
//!
//! An immediate child of a scanned directory is a candidate when its name
//! does not start with `.` and it is either a `*.json` manifest file or a
//! subdirectory containing a `plugin.json`. The candidate's name (file
//! stem or directory name) is its module name.
//!
//! # Failure semantics
//!
//! A candidate that cannot be read, parsed, or interpreted is logged as a
//! warning and skipped; it never aborts the scan. An empty result map is
//! valid — it means no implementations are enabled at the scanned
//! locations.
//!
//! # Determinism
//!
//! The base directory is scanned first, then the environment-variable
//! locations in the order listed; entries within a directory are visited
//! in sorted order. Name collisions are last-write-wins, so later
//! locations override earlier ones.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use descry_core::Result;

use crate::manifest::{DIR_MANIFEST, ExportSpec, Manifest};
use crate::registry::{PluginFactory, PluginRegistry};

/// The per-family parameters of a discovery call.
#[derive(Debug, Clone)]
pub struct DiscoverySpec {
    /// Capability family name; must match the registry's family.
    pub family: String,

    /// Base directory scanned first.
    pub base_dir: PathBuf,

    /// Environment variable naming additional search locations
    /// (path-separator delimited).
    pub env_var: String,

    /// Manifest key holding the family's export declaration.
    pub export_key: String,
}

impl DiscoverySpec {
    /// Create a discovery spec.
    pub fn new(
        family: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        env_var: impl Into<String>,
        export_key: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            base_dir: base_dir.into(),
            env_var: env_var.into(),
            export_key: export_key.into(),
        }
    }
}

/// A plugin candidate found in a scanned directory.
#[derive(Debug, Clone)]
struct Candidate {
    /// Module name: file stem or directory name.
    name: String,

    /// Path of the manifest to read.
    manifest: PathBuf,
}

/// The discovery engine.
///
/// Parsed manifests are cached per path, so repeated discovery calls do
/// not re-read unchanged files; [`DiscoveryEngine::reset`] drops the cache
/// when plugin locations have changed on disk.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use descry_plugin::{DiscoveryEngine, DiscoverySpec, PluginFactory, PluginRegistry};
///
/// struct Mem;
/// impl PluginFactory for Mem {
///     fn name(&self) -> &str { "memory" }
/// }
///
/// let mut registry: PluginRegistry<dyn PluginFactory> = PluginRegistry::new("widget");
/// registry.register(Arc::new(Mem))?;
///
/// let spec = DiscoverySpec::new("widget", "/etc/widgets", "WIDGET_PATH", "widget");
/// let mut engine = DiscoveryEngine::new();
/// let found = engine.discover(&spec, &registry);
/// for (name, factory) in &found {
///     println!("{name} -> {}", factory.name());
/// }
/// # Ok::<(), descry_core::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct DiscoveryEngine {
    manifests: HashMap<PathBuf, Manifest>,
}

impl DiscoveryEngine {
    /// Create an engine with an empty manifest cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cached manifests.
    ///
    /// The next [`discover`](DiscoveryEngine::discover) call re-reads every
    /// manifest from disk. This replaces any notion of "force reload".
    pub fn reset(&mut self) {
        self.manifests.clear();
    }

    /// Scan all configured locations and return the enabled, validated
    /// implementations for `spec`'s family.
    ///
    /// Never fails: per-candidate problems are logged and skipped, and an
    /// empty map is a valid result.
    pub fn discover<F: PluginFactory + ?Sized>(
        &mut self,
        spec: &DiscoverySpec,
        registry: &PluginRegistry<F>,
    ) -> BTreeMap<String, Arc<F>> {
        if registry.family() != spec.family {
            log::warn!(
                "discovery spec family '{}' does not match registry family '{}'",
                spec.family,
                registry.family()
            );
        }

        let mut found = BTreeMap::new();
        for dir in search_paths(spec) {
            for candidate in scan_dir(&dir) {
                self.resolve_candidate(&candidate, spec, registry, &mut found);
            }
        }
        log::debug!(
            "discovered {} '{}' implementation(s)",
            found.len(),
            spec.family
        );
        found
    }

    /// Apply the two resolution strategies to one candidate and merge the
    /// survivors into `found` (last-write-wins).
    fn resolve_candidate<F: PluginFactory + ?Sized>(
        &mut self,
        candidate: &Candidate,
        spec: &DiscoverySpec,
        registry: &PluginRegistry<F>,
        found: &mut BTreeMap<String, Arc<F>>,
    ) {
        let manifest = match self.manifest(&candidate.manifest) {
            Ok(manifest) => manifest,
            Err(err) => {
                log::warn!(
                    "skipping plugin candidate '{}' ({}): {err}",
                    candidate.name,
                    candidate.manifest.display()
                );
                return;
            }
        };

        match manifest.export_spec(&spec.export_key) {
            Err(err) => {
                log::warn!(
                    "skipping plugin candidate '{}' ({}): {err}",
                    candidate.name,
                    candidate.manifest.display()
                );
            }
            Ok(Some(ExportSpec::OptOut)) => {
                log::debug!("candidate '{}' opted out", candidate.name);
            }
            Ok(Some(ExportSpec::One(name))) => {
                // A single export is registered under the candidate's own
                // name, which is what makes cross-location overrides of
                // the same key possible.
                if let Some(factory) = validated(&name, spec, registry) {
                    found.insert(candidate.name.clone(), factory);
                }
            }
            Ok(Some(ExportSpec::Many(names))) => {
                for name in names {
                    if let Some(factory) = validated(&name, spec, registry) {
                        found.insert(name, factory);
                    }
                }
            }
            Ok(None) => {
                // No export declaration: fall back to the candidate's own
                // name. An unresolvable name here just means the candidate
                // exports nothing.
                match validated(&candidate.name, spec, registry) {
                    Some(factory) => {
                        found.insert(candidate.name.clone(), factory);
                    }
                    None => {
                        log::debug!(
                            "candidate '{}' declares no exports and matches no registered name",
                            candidate.name
                        );
                    }
                }
            }
        }
    }

    /// Fetch a manifest through the cache. Parse failures are not cached,
    /// so a fixed-up file is picked up on the next scan.
    fn manifest(&mut self, path: &Path) -> Result<Manifest> {
        if let Some(manifest) = self.manifests.get(path) {
            return Ok(manifest.clone());
        }
        let manifest = Manifest::load(path)?;
        self.manifests.insert(path.to_path_buf(), manifest.clone());
        Ok(manifest)
    }
}

/// Check one exported name against the registry.
///
/// Rejections (the family name itself, unregistered names) are silent
/// except for a debug line; a registered-but-unusable factory is a
/// warning. None of these abort the scan.
fn validated<F: PluginFactory + ?Sized>(
    name: &str,
    spec: &DiscoverySpec,
    registry: &PluginRegistry<F>,
) -> Option<Arc<F>> {
    if name == spec.family {
        log::debug!(
            "rejected export '{name}': names the '{}' family itself",
            spec.family
        );
        return None;
    }
    let Some(factory) = registry.get(name) else {
        log::debug!(
            "rejected export '{name}': not a registered '{}' implementation",
            spec.family
        );
        return None;
    };
    if !factory.is_usable() {
        log::warn!("skipping '{name}': implementation reports itself unusable");
        return None;
    }
    Some(factory)
}

/// All locations to scan: the base directory, then the environment
/// variable's locations in listed order.
fn search_paths(spec: &DiscoverySpec) -> Vec<PathBuf> {
    let mut paths = vec![spec.base_dir.clone()];
    if let Some(value) = std::env::var_os(&spec.env_var) {
        paths.extend(env_search_paths(&value));
    }
    paths
}

/// Split a path-separator-delimited environment value into locations,
/// expanding `~` in each entry.
fn env_search_paths(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| {
            let expanded = shellexpand::tilde(&p.to_string_lossy()).into_owned();
            PathBuf::from(expanded)
        })
        .collect()
}

/// List the candidates in one directory, sorted by module name.
///
/// An unreadable or missing directory contributes nothing.
fn scan_dir(dir: &Path) -> Vec<Candidate> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("not scanning {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            continue;
        };
        if file_name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            let manifest = path.join(DIR_MANIFEST);
            if manifest.is_file() {
                candidates.push(Candidate {
                    name: file_name.to_string(),
                    manifest,
                });
            }
        } else if path.extension().and_then(OsStr::to_str) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(OsStr::to_str) {
                candidates.push(Candidate {
                    name: stem.to_string(),
                    manifest: path.clone(),
                });
            }
        }
    }

    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates
}
