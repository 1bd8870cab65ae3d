//! Shared harness: a line-based unit loader and tempdir fixtures.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use lazyroot_autoload::{Autoloader, Binding, NamespaceId, UnitLoader, Value};
use tempfile::TempDir;

/// Runs `.unit` files made of one command per line:
///
/// ```text
/// # comment
/// namespace A::B     open (or create) a namespace path
/// anonymous A::B     bind a fresh anonymous namespace at A::B
/// set A::X 3         bind an integer
/// copy A::Y A::X     resolve A::X and bind the result at A::Y
/// require feature    require another unit
/// fail message       error out
/// ```
pub struct ScriptLoader;

impl UnitLoader for ScriptLoader {
	fn extension(&self) -> &str {
		"unit"
	}

	fn load(&self, autoloader: &mut Autoloader, path: &Path) -> anyhow::Result<()> {
		let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
		for line in source.lines().map(str::trim) {
			if line.is_empty() || line.starts_with('#') {
				continue;
			}
			let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
			match command {
				"namespace" => {
					open(autoloader, argument)?;
				}
				"anonymous" => {
					let (parent, name) = split_last(autoloader, argument)?;
					let id = autoloader.new_namespace();
					autoloader.define(parent, name, Value::Namespace(id));
				}
				"set" => {
					let (target, number) = argument.split_once(' ').context("set needs a value")?;
					let number: i64 = number.trim().parse()?;
					let (parent, name) = split_last(autoloader, target)?;
					autoloader.define(parent, name, Value::object(number));
				}
				"copy" => {
					let (target, source) = argument.split_once(' ').context("copy needs a source")?;
					let value = autoloader
						.resolve(source)?
						.with_context(|| format!("{source} is not defined"))?;
					let (parent, name) = split_last(autoloader, target)?;
					autoloader.define(parent, name, value);
				}
				"require" => {
					autoloader.require(argument)?;
				}
				"fail" => bail!("{argument}"),
				other => bail!("unknown command {other}"),
			}
		}
		Ok(())
	}
}

/// Opens every segment of `path` as a namespace.
pub fn open(autoloader: &mut Autoloader, path: &str) -> lazyroot_autoload::Result<NamespaceId> {
	let mut id = NamespaceId::ROOT;
	for segment in path.split("::") {
		id = autoloader.define_namespace(id, segment)?;
	}
	Ok(id)
}

fn split_last<'a>(autoloader: &mut Autoloader, path: &'a str) -> anyhow::Result<(NamespaceId, &'a str)> {
	match path.rsplit_once("::") {
		Some((parent, name)) => Ok((open(autoloader, parent)?, name)),
		None => Ok((NamespaceId::ROOT, path)),
	}
}

pub fn autoloader() -> Autoloader {
	Autoloader::new(ScriptLoader)
}

/// Resolves `path` and reads it as an integer.
pub fn int(autoloader: &mut Autoloader, path: &str) -> Option<i64> {
	autoloader
		.resolve(path)
		.expect("must resolve")
		.and_then(|value| value.downcast_ref::<i64>().copied())
}

/// Looks up `path` without resolving anything.
pub fn binding<'a>(autoloader: &'a Autoloader, path: &str) -> Option<&'a Binding> {
	let namespaces = autoloader.namespaces();
	let (parent, name) = match path.rsplit_once("::") {
		None => (NamespaceId::ROOT, path),
		Some((parent_path, name)) => {
			let mut id = NamespaceId::ROOT;
			for segment in parent_path.split("::") {
				id = namespaces.value(id, segment)?.as_namespace()?;
			}
			(id, name)
		}
	};
	namespaces.binding(parent, name)
}

pub fn is_defined(autoloader: &Autoloader, path: &str) -> bool {
	matches!(binding(autoloader, path), Some(Binding::Defined(_)))
}

pub fn is_deferred(autoloader: &Autoloader, path: &str) -> bool {
	matches!(binding(autoloader, path), Some(Binding::Deferred(_)))
}

/// A scratch directory holding one or more roots.
pub struct Fixture {
	dir: TempDir,
	base: PathBuf,
}

impl Fixture {
	pub fn new() -> Self {
		let dir = tempfile::tempdir().expect("must create tempdir");
		let base = fs::canonicalize(dir.path()).expect("must canonicalize tempdir");
		Self { dir, base }
	}

	/// Canonical path of `relative` inside the fixture.
	pub fn path(&self, relative: &str) -> PathBuf {
		self.base.join(relative)
	}

	pub fn mkdir(&self, relative: &str) -> PathBuf {
		let path = self.path(relative);
		fs::create_dir_all(&path).expect("must create dir");
		path
	}

	pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
		let path = self.path(relative);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).expect("must create parent dirs");
		}
		fs::write(&path, contents).expect("must write unit");
		path
	}

	/// Creates a symlink at `link` pointing at `target`.
	#[cfg(unix)]
	pub fn symlink(&self, link: &str, target: &str) -> PathBuf {
		let path = self.path(link);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).expect("must create parent dirs");
		}
		std::os::unix::fs::symlink(self.path(target), &path).expect("must create symlink");
		path
	}

	pub fn remove(&self, relative: &str) {
		let path = self.path(relative);
		if path.is_dir() {
			fs::remove_dir_all(path).expect("must remove dir");
		} else {
			fs::remove_file(path).expect("must remove file");
		}
	}
}
