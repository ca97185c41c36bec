//! Runs the examples attached to an object graph.
//!
//! Examples are zero-argument functions stored under the `examples` field
//! of any object in the graph. The runner walks the graph the way
//! documentation is laid out: each object's own properties, grouped by
//! category, every object at most once.

use marginalia_primitives::{CallError, Object, Value};
use marginalia_registry::{FieldRegistry, names};
use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::resolver::Resolver;
use crate::target::AsTarget;


const ANONYMOUS: &str = "(Anonymous Object)";

/// Outcome of one group of examples sharing a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleCase {
	/// Label of the object the examples belong to.
	pub subject: String,
	/// `(category)` and `.member` segments from the root to the subject.
	pub path: Vec<String>,
	pub heading: String,
	/// The first failure among the group's examples, if any.
	pub outcome: std::result::Result<(), CallError>,
}

impl ExampleCase {
	pub fn passed(&self) -> bool {
		self.outcome.is_ok()
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleReport {
	pub cases: Vec<ExampleCase>,
}

impl ExampleReport {
	pub fn passed(&self) -> usize {
		self.cases.iter().filter(|case| case.passed()).count()
	}

	pub fn failed(&self) -> usize {
		self.cases.len() - self.passed()
	}

	pub fn is_success(&self) -> bool {
		self.cases.iter().all(ExampleCase::passed)
	}
}

/// Walks an object graph and invokes every example found.
#[derive(Debug, Clone, Copy)]
pub struct ExampleRunner<'a> {
	resolver: Resolver<'a>,
	registry: &'a FieldRegistry,
	heading: &'a str,
}

impl<'a> ExampleRunner<'a> {
	pub fn new(resolver: Resolver<'a>, registry: &'a FieldRegistry) -> Self {
		Self {
			resolver,
			registry,
			heading: "Examples",
		}
	}

	/// Heading for examples that carry no `name` of their own.
	pub fn with_heading(mut self, heading: &'a str) -> Self {
		self.heading = heading;
		self
	}

	pub fn run(&self, root: &impl AsTarget) -> Result<ExampleReport> {
		let root = root.as_target()?;
		let mut report = ExampleReport::default();
		let mut paths = PathArena::default();
		let mut visited = FxHashSet::default();
		let mut stack = vec![(root.clone(), None)];

		while let Some((object, at)) = stack.pop() {
			if !visited.insert(object.clone()) {
				continue;
			}
			self.run_examples(&object, || paths.resolve(at), &mut report)?;

			let mut children = Vec::new();
			for group in self.resolver.properties(&object)? {
				let category = paths.push(at, format!("({})", group.category));
				for member in &group.members {
					let member_at = paths.push(Some(category), format!(".{}", member.name));
					paths.nested_objects(&member.value, member_at, &mut children);
				}
			}
			stack.extend(children.into_iter().rev());
		}

		tracing::info!(
			domain = "examples",
			passed = report.passed(),
			failed = report.failed(),
			"examples finished",
		);
		Ok(report)
	}

	fn run_examples(
		&self,
		object: &Object,
		path: impl FnOnce() -> Vec<String>,
		report: &mut ExampleReport,
	) -> Result<()> {
		let examples = self.examples_of(object)?;
		if examples.is_empty() {
			return Ok(());
		}
		let subject = self.subject(object)?;
		let path = path();
		for (heading, functions) in self.group_by_heading(examples)? {
			let outcome = functions.iter().try_for_each(|f| f.call(&[]).map(drop));
			if let Err(error) = &outcome {
				tracing::warn!(
					domain = "examples",
					subject = %subject,
					heading = %heading,
					%error,
					"example failed",
				);
			}
			report.cases.push(ExampleCase {
				subject: subject.clone(),
				path: path.clone(),
				heading,
				outcome,
			});
		}
		Ok(())
	}

	fn examples_of(&self, object: &Object) -> Result<Vec<Object>> {
		let field = self.registry.get_or_adhoc(names::EXAMPLES);
		let value = self.resolver.resolve(object, &field)?;
		let candidates = match value {
			None => return Ok(Vec::new()),
			Some(Value::List(items)) => items,
			Some(single) => vec![single],
		};
		Ok(candidates
			.into_iter()
			.filter_map(|candidate| match candidate {
				Value::Object(f) if f.is_callable() => Some(f),
				other => {
					tracing::debug!(
						domain = "examples",
						got = other.type_name(),
						"skipping non-function example",
					);
					None
				}
			})
			.collect())
	}

	/// Groups examples by heading, keeping first-seen order.
	fn group_by_heading(&self, examples: Vec<Object>) -> Result<Vec<(String, Vec<Object>)>> {
		let mut groups: Vec<(String, Vec<Object>)> = Vec::new();
		for example in examples {
			let heading = match self.resolver.own(&example, names::NAME)? {
				Some(Value::String(name)) => name.replacen('_', " ", 1),
				_ => self.heading.to_owned(),
			};
			match groups.iter_mut().find(|(h, _)| *h == heading) {
				Some((_, functions)) => functions.push(example),
				None => groups.push((heading, vec![example])),
			}
		}
		Ok(groups)
	}

	fn subject(&self, object: &Object) -> Result<String> {
		for name in [names::SIGNATURE, names::NAME] {
			let field = self.registry.get_or_adhoc(name);
			if let Some(Value::String(label)) = self.resolver.resolve(object, &field)? {
				return Ok(label.to_string());
			}
		}
		Ok(ANONYMOUS.to_owned())
	}
}

/// Path segments stored once and linked to their parent segment, so deep
/// walks share prefixes instead of copying them.
#[derive(Default)]
struct PathArena {
	segments: Vec<(Option<usize>, String)>,
}

impl PathArena {
	fn push(&mut self, parent: Option<usize>, segment: String) -> usize {
		self.segments.push((parent, segment));
		self.segments.len() - 1
	}

	fn resolve(&self, mut at: Option<usize>) -> Vec<String> {
		let mut path = Vec::new();
		while let Some(index) = at {
			let (parent, segment) = &self.segments[index];
			path.push(segment.clone());
			at = *parent;
		}
		path.reverse();
		path
	}

	/// Objects held by a member value. List elements extend the member's
	/// path with `[index]`, map entries with `.key`.
	fn nested_objects(
		&mut self,
		value: &Value,
		at: usize,
		out: &mut Vec<(Object, Option<usize>)>,
	) {
		match value {
			Value::Object(object) => out.push((object.clone(), Some(at))),
			Value::List(items) => {
				for (index, item) in items.iter().enumerate() {
					let item_at = self.push(Some(at), format!("[{index}]"));
					self.nested_objects(item, item_at, out);
				}
			}
			Value::Map(record) => {
				for (key, item) in record {
					let item_at = self.push(Some(at), format!(".{key}"));
					self.nested_objects(item, item_at, out);
				}
			}
			_ => {}
		}
	}
}
