// ---------------------------------------------------------------------------
// Path-spec parser — compile a spec string into a flat list of entries
// ---------------------------------------------------------------------------
//
// Grammar:
//   spec     = segment { "/" segment }
//   segment  = name [ "(" tags ")" ] [ "[" children "]" ]
//   tags     = tag { "," tag }          tag = ("err" | "data" | "isdir") "=" text
//   children = child { "," child }      child = name [ "(" tags ")" ]
//
// Example: "/home/john[notes.txt(data=hello), broken(err=EACCES)]/cache"
//
// Parsing never fails. Unbalanced groups turn the whole segment into a
// literal name and unknown tags are dropped.
// ---------------------------------------------------------------------------

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::Entry;
use crate::path::{join, ROOT};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?P<tag>err|data|isdir)=(?P<value>.*)$").expect("tag pattern is valid")
});

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tag values attached to a segment or child.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tags {
	error: Option<String>,
	content: Option<Vec<u8>>,
	is_dir: bool,
}

impl Default for Tags {
	fn default() -> Self {
		Self {
			error: None,
			content: None,
			is_dir: true,
		}
	}
}

/// A segment split into its three syntactic parts.
#[derive(Debug, PartialEq, Eq)]
struct Segment<'a> {
	name: &'a str,
	tags: Option<&'a str>,
	children: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Split `s` on `sep`, ignoring separators nested inside `(...)` or `[...]`.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
	let mut results = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;

	for (i, ch) in s.char_indices() {
		match ch {
			'(' | '[' => depth += 1,
			')' | ']' => depth = depth.saturating_sub(1),
			c if c == sep && depth == 0 => {
				results.push(&s[start..i]);
				start = i + c.len_utf8();
			}
			_ => {}
		}
	}
	results.push(&s[start..]);
	results
}

/// Find the index of the bracket closing the one at `open_idx`.
fn find_closing(s: &str, open_idx: usize) -> Option<usize> {
	let open = s[open_idx..].chars().next()?;
	let close = match open {
		'(' => ')',
		'[' => ']',
		_ => return None,
	};
	let mut depth = 0usize;
	for (i, ch) in s[open_idx..].char_indices() {
		if ch == open {
			depth += 1;
		} else if ch == close {
			depth -= 1;
			if depth == 0 {
				return Some(open_idx + i);
			}
		}
	}
	None
}

fn split_segment(raw: &str) -> Segment<'_> {
	let literal = Segment {
		name: raw.trim(),
		tags: None,
		children: None,
	};

	let Some(group_start) = raw.find(['(', '[']) else {
		return literal;
	};

	let mut segment = Segment {
		name: raw[..group_start].trim(),
		tags: None,
		children: None,
	};

	let mut pos = group_start;
	while pos < raw.len() {
		let rest = &raw[pos..];
		let trimmed = rest.trim_start();
		if trimmed.is_empty() {
			break;
		}
		pos += rest.len() - trimmed.len();

		let Some(close) = find_closing(raw, pos) else {
			return literal;
		};
		let inner = &raw[pos + 1..close];
		let slot = if raw[pos..].starts_with('(') {
			&mut segment.tags
		} else {
			&mut segment.children
		};
		if slot.is_some() {
			return literal;
		}
		*slot = Some(inner);
		pos = close + 1;
	}

	segment
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

fn parse_tags(raw: Option<&str>) -> Tags {
	let mut tags = Tags::default();
	let Some(raw) = raw else {
		return tags;
	};

	for item in split_top_level(raw, ',') {
		let Some(caps) = TAG_RE.captures(item.trim()) else {
			continue;
		};
		let value = &caps["value"];
		match &caps["tag"] {
			"err" => tags.error = Some(value.to_string()),
			"data" => tags.content = Some(value.as_bytes().to_vec()),
			"isdir" => {
				if value.trim() == "false" {
					tags.is_dir = false;
				}
			}
			_ => {}
		}
	}
	tags
}

/// Names that cannot be a single path segment. `join` would split them, so the
/// entry's name would no longer match the last segment of its path.
fn spans_segments(name: &str) -> bool {
	name.contains(['/', '\\'])
}

fn build_entry(name: &str, path: String, is_dir: bool, tags: Tags) -> Entry {
	Entry {
		name: name.to_string(),
		path,
		is_dir,
		error: tags.error,
		content: tags.content,
		..Entry::file(name)
	}
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Compile one spec into the entries it implies, in declaration order: each
/// segment is followed by its bracketed children.
///
/// A leading `/` is optional. Segments named `.` or `..`, and empty ones,
/// only move the cursor; their bracketed children are still emitted. A name
/// that would span several segments (an unbalanced group swallowing a `/`,
/// or a bracketed child such as `a/b`) is dropped along with its children.
pub fn parse(spec: &str) -> Vec<Entry> {
	let mut entries = Vec::new();
	let mut current = ROOT.to_string();

	let body = spec.trim().strip_prefix('/').unwrap_or(spec.trim());
	for raw in split_top_level(body, '/') {
		let segment = split_segment(raw);
		if spans_segments(segment.name) {
			continue;
		}
		let path = join(&current, segment.name);

		if !matches!(segment.name, "" | "." | "..") {
			let tags = parse_tags(segment.tags);
			let is_dir = tags.is_dir;
			entries.push(build_entry(segment.name, path.clone(), is_dir, tags));
		}

		if let Some(children) = segment.children {
			for raw_child in split_top_level(children, ',') {
				let child = split_segment(raw_child);
				if matches!(child.name, "" | "." | "..") || spans_segments(child.name) {
					continue;
				}
				// Bracketed children are always files; `isdir` has no effect.
				let tags = parse_tags(child.tags);
				entries.push(build_entry(child.name, join(&path, child.name), false, tags));
			}
		}

		current = path;
	}

	tracing::trace!(target: "fsmock", spec, entries = entries.len(), "parsed spec");
	entries
}

/// Parse several specs, concatenating their entries in order.
pub fn parse_all<S: AsRef<str>>(specs: &[S]) -> Vec<Entry> {
	specs.iter().flat_map(|s| parse(s.as_ref())).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	fn dir(name: &str, path: &str) -> Entry {
		Entry::dir(name).at(path)
	}

	fn file(name: &str, path: &str) -> Entry {
		Entry::file(name).at(path)
	}

	// -- split_segment --

	#[test]
	fn segment_plain_name() {
		assert_eq!(
			split_segment(" dir "),
			Segment { name: "dir", tags: None, children: None }
		);
	}

	#[test]
	fn segment_tags_and_children() {
		assert_eq!(
			split_segment("dir(err=x)[a, b]"),
			Segment { name: "dir", tags: Some("err=x"), children: Some("a, b") }
		);
	}

	#[test]
	fn segment_children_before_tags() {
		assert_eq!(
			split_segment("dir[a](isdir=false)"),
			Segment { name: "dir", tags: Some("isdir=false"), children: Some("a") }
		);
	}

	#[test]
	fn segment_unterminated_group_is_literal() {
		assert_eq!(
			split_segment("dir(err=x"),
			Segment { name: "dir(err=x", tags: None, children: None }
		);
		assert_eq!(split_segment("dir[a, b").name, "dir[a, b");
	}

	#[test]
	fn segment_trailing_text_is_literal() {
		assert_eq!(split_segment("dir(err=x)tail").name, "dir(err=x)tail");
	}

	// -- parse_tags --

	#[test]
	fn tags_default_to_directory() {
		assert_eq!(parse_tags(None), Tags::default());
		assert!(parse_tags(Some("")).is_dir);
	}

	#[test]
	fn tags_all_known() {
		let t = parse_tags(Some("err=boom, data=hello, isdir=false"));
		assert_eq!(t.error.as_deref(), Some("boom"));
		assert_eq!(t.content.as_deref(), Some(&b"hello"[..]));
		assert!(!t.is_dir);
	}

	#[test]
	fn tags_unknown_and_malformed_are_ignored() {
		let t = parse_tags(Some("err=test, invalid=test, nonsense"));
		assert_eq!(t.error.as_deref(), Some("test"));
		assert!(t.content.is_none());
	}

	#[test]
	fn tags_isdir_true_keeps_directory() {
		assert!(parse_tags(Some("isdir=true")).is_dir);
	}

	#[test]
	fn tag_value_may_contain_separators() {
		let t = parse_tags(Some("data=a=b"));
		assert_eq!(t.content.as_deref(), Some(&b"a=b"[..]));
	}

	// -- parse --

	#[test]
	fn parse_simple_dir() {
		assert_eq!(parse("dir"), vec![dir("dir", "/dir")]);
	}

	#[test]
	fn parse_leading_separator_is_optional() {
		assert_eq!(parse("/home/john"), parse("home/john"));
	}

	#[test]
	fn parse_dir_with_tags() {
		assert_eq!(
			parse("dir(err=test, data=test)"),
			vec![dir("dir", "/dir").with_error("test").with_content("test")]
		);
	}

	#[test]
	fn parse_isdir_false() {
		assert_eq!(parse("/etc/hosts(isdir=false)")[1], file("hosts", "/etc/hosts"));
	}

	#[test]
	fn parse_dir_with_files() {
		assert_eq!(
			parse("dir[file1, file2]"),
			vec![dir("dir", "/dir"), file("file1", "/dir/file1"), file("file2", "/dir/file2")]
		);
	}

	#[test]
	fn parse_complex_path() {
		let got = parse(
			"/home/barbara[notes.txt(data=somenote)]/dir[file1(err=someerr), file2(data=testdata)]/subdir",
		);
		assert_eq!(
			got,
			vec![
				dir("home", "/home"),
				dir("barbara", "/home/barbara"),
				file("notes.txt", "/home/barbara/notes.txt").with_content("somenote"),
				dir("dir", "/home/barbara/dir"),
				file("file1", "/home/barbara/dir/file1").with_error("someerr"),
				file("file2", "/home/barbara/dir/file2").with_content("testdata"),
				dir("subdir", "/home/barbara/dir/subdir"),
			]
		);
	}

	#[test]
	fn parse_child_tags_with_commas() {
		let got = parse("/d[f(err=a, data=b)]");
		assert_eq!(got[1], file("f", "/d/f").with_error("a").with_content("b"));
	}

	#[test]
	fn parse_child_isdir_is_ignored() {
		assert!(parse("/d[f(isdir=true)]")[1].is_file());
	}

	#[test]
	fn parse_empty_segments_are_skipped() {
		assert_eq!(parse("/a//b/"), vec![dir("a", "/a"), dir("b", "/a/b")]);
		assert!(parse("").is_empty());
		assert!(parse("/").is_empty());
	}

	#[test]
	fn parse_root_children() {
		assert_eq!(parse("/[a, b]"), vec![file("a", "/a"), file("b", "/b")]);
	}

	#[test]
	fn parse_dotdot_moves_cursor() {
		assert_eq!(
			parse("/a/b/../c"),
			vec![dir("a", "/a"), dir("b", "/a/b"), dir("c", "/a/c")]
		);
	}

	#[test]
	fn parse_names_with_punctuation() {
		let got = parse("/srv/app-1.0:blue?[read me.txt]");
		assert_eq!(got[1].name, "app-1.0:blue?");
		assert_eq!(got[2].path, "/srv/app-1.0:blue?/read me.txt");
	}

	#[test]
	fn parse_child_spanning_segments_is_dropped() {
		assert_eq!(
			parse("/d[a/b(data=x), c]"),
			vec![dir("d", "/d"), file("c", "/d/c")]
		);
		assert_eq!(parse("/d[a\\b]"), vec![dir("d", "/d")]);
	}

	#[test]
	fn parse_unbalanced_group_across_separator_is_dropped() {
		assert_eq!(parse("/a/b[x/c"), vec![dir("a", "/a")]);
		for entry in parse("/a(err=x/y)/b[c(data=1/2)]") {
			assert_eq!(crate::path::base_name(&entry.path), entry.name);
		}
	}

	#[test]
	fn parse_all_concatenates() {
		let got = parse_all(&["/a", "/b[c]"]);
		let paths: Vec<&str> = got.iter().map(|e| e.path.as_str()).collect();
		assert_eq!(paths, vec!["/a", "/b", "/b/c"]);
	}

	#[test]
	fn parse_is_deterministic() {
		let spec = "/home/john[file1(data=test)]";
		assert_eq!(parse(spec), parse(spec));
	}
}
