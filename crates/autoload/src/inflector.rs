//! Naming convention mapping file basenames to symbol names.

/// Converts a file or directory basename into a candidate symbol name.
///
/// Any `Fn(&str) -> String` closure is an inflector.
pub trait Inflector: Send + Sync {
	/// Returns the candidate symbol for `basename` (extension already stripped).
	fn camelize(&self, basename: &str) -> String;
}

impl<F> Inflector for F
where
	F: Fn(&str) -> String + Send + Sync,
{
	fn camelize(&self, basename: &str) -> String {
		self(basename)
	}
}

/// Default inflector: capitalizes `_`-separated words (`foo_bar` -> `FooBar`).
///
/// Each word keeps only its first letter uppercase, so `fooBar` becomes
/// `Foobar` and `HTTP_client` becomes `HttpClient`.
///
/// Basenames containing anything besides ASCII alphanumerics and `_` are
/// returned unchanged so that they fail [`is_valid_symbol`] and get skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInflector;

impl Inflector for BasicInflector {
	fn camelize(&self, basename: &str) -> String {
		if basename
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
		{
			basename.split('_').map(capitalize).collect()
		} else {
			basename.to_owned()
		}
	}
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	let mut capitalized = String::with_capacity(word.len());
	if let Some(first) = chars.next() {
		capitalized.push(first.to_ascii_uppercase());
		capitalized.extend(chars.map(|c| c.to_ascii_lowercase()));
	}
	capitalized
}

/// Returns true if `name` can be bound as a symbol: an uppercase ASCII letter
/// followed by ASCII word characters.
pub fn is_valid_symbol(name: &str) -> bool {
	let mut chars = name.chars();
	chars.next().is_some_and(|c| c.is_ascii_uppercase())
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
