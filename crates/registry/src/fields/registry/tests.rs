use marginalia_primitives::Value;

use super::*;
use crate::fields::builtins::names;
use crate::fields::config::{FieldSpec, FieldsConfig};
use crate::fields::merge::MergeStrategy;

#[test]
fn test_builtins_are_registered() {
	let registry = FieldRegistry::with_builtins();
	assert_eq!(registry.len(), BUILTINS.len());
	for builtin in BUILTINS {
		let field = registry.get(builtin.name).unwrap();
		assert_eq!(field.source, FieldSource::Builtin);
		assert_eq!(field.allows_inheritance(), builtin.allow_inheritance);
		assert_eq!(field.allows_propagation(), builtin.propagation.is_some());
	}
}

#[test]
fn test_builtin_flags() {
	let registry = FieldRegistry::default();
	let flags = |name: &str| {
		let f = registry.get(name).unwrap();
		(f.allows_inheritance(), f.allows_propagation())
	};

	assert_eq!(flags(names::LICENCE), (true, true));
	assert_eq!(flags(names::STABILITY), (true, true));
	assert_eq!(flags(names::PORTABLE), (true, true));
	assert_eq!(flags(names::SINCE), (true, false));
	assert_eq!(flags(names::NPM_PACKAGE), (true, false));
	assert_eq!(flags(names::CATEGORY), (false, false));
	assert_eq!(flags(names::BELONGS_TO), (false, false));
	assert_eq!(flags(names::EXAMPLES), (false, false));
}

#[test]
fn test_builtin_merges() {
	let registry = FieldRegistry::default();
	let stability = registry.get(names::STABILITY).unwrap();
	assert_eq!(
		stability.merge(vec!["stable".into(), "deprecated".into()]),
		Ok(Some(Value::from("deprecated")))
	);

	let portable = registry.get(names::PORTABLE).unwrap();
	assert_eq!(
		portable.merge(vec![true.into(), false.into()]),
		Ok(Some(Value::Bool(false)))
	);
	assert_eq!(portable.merge(Vec::new()), Ok(None));
}

#[test]
fn test_define_runtime_field() {
	let registry = FieldRegistry::with_builtins();
	let field = registry
		.define(
			"reviewers",
			FieldOptions::new()
				.inheritable()
				.propagating(MergeStrategy::Unique),
		)
		.unwrap();

	assert_eq!(field.source, FieldSource::Runtime);
	assert!(field.ptr_eq(&registry.get("reviewers").unwrap()));
	assert_eq!(registry.items().last().map(|f| f.name().to_string()), Some("reviewers".into()));
}

#[test]
fn test_define_rejects_empty_name() {
	let registry = FieldRegistry::empty();
	assert!(matches!(
		registry.define("", FieldOptions::new()),
		Err(ConfigurationError::EmptyName)
	));
	assert!(registry.is_empty());
}

#[test]
fn test_define_rejects_builtin_names() {
	let registry = FieldRegistry::with_builtins();
	let err = registry
		.define(names::STABILITY, FieldOptions::new())
		.unwrap_err();
	assert!(matches!(err, ConfigurationError::BuiltinRedefined(ref n) if n == "stability"));

	// The built-in is untouched.
	assert!(registry.get(names::STABILITY).unwrap().allows_propagation());
}

#[test]
fn test_define_rejects_duplicates() {
	let registry = FieldRegistry::with_builtins();
	registry.define("score", FieldOptions::new()).unwrap();
	assert!(matches!(
		registry.define("score", FieldOptions::new().inheritable()),
		Err(ConfigurationError::DuplicateField(_))
	));
	assert!(!registry.get("score").unwrap().allows_inheritance());
}

#[test]
fn test_registries_are_independent() {
	let a = FieldRegistry::with_builtins();
	let b = FieldRegistry::with_builtins();
	a.define("only-in-a", FieldOptions::new()).unwrap();
	assert!(a.contains("only-in-a"));
	assert!(!b.contains("only-in-a"));
}

#[test]
fn test_get_or_adhoc() {
	let registry = FieldRegistry::with_builtins();
	assert_eq!(registry.get_or_adhoc(names::LICENCE).source, FieldSource::Builtin);

	let adhoc = registry.get_or_adhoc("unknown");
	assert_eq!(adhoc.source, FieldSource::AdHoc);
	assert!(!adhoc.allows_inheritance());
	assert!(!registry.contains("unknown"));
}

#[test]
fn test_define_from_config() {
	let config = FieldsConfig::from_toml_str(
		r#"
		[[fields]]
		name = "reviewers"
		inherit = true
		propagate = true
		merge = "unique"

		[[fields]]
		name = "summary"
		"#,
	)
	.unwrap();

	let registry = FieldRegistry::with_builtins();
	let defined = registry.define_from_config(&config).unwrap();
	assert_eq!(defined.len(), 2);

	let reviewers = registry.get("reviewers").unwrap();
	assert!(reviewers.allows_inheritance());
	assert!(reviewers.allows_propagation());
	assert_eq!(
		reviewers.merge(vec![Value::list(["a", "b"]), "a".into()]),
		Ok(Some(Value::list(["a", "b"])))
	);

	let summary = registry.get("summary").unwrap();
	assert!(!summary.allows_inheritance());
	assert!(!summary.allows_propagation());
}

#[test]
fn test_define_from_config_is_all_or_nothing() {
	let config = FieldsConfig::from_toml_str(
		r#"
		[[fields]]
		name = "fresh"

		[[fields]]
		name = "licence"
		"#,
	)
	.unwrap();

	let registry = FieldRegistry::with_builtins();
	assert!(matches!(
		registry.define_from_config(&config),
		Err(ConfigurationError::BuiltinRedefined(_))
	));
	assert!(!registry.contains("fresh"));
}

#[test]
fn test_config_rejects_unknown_merge() {
	let result = FieldsConfig::from_toml_str(
		r#"
		[[fields]]
		name = "x"
		propagate = true
		merge = "average"
		"#,
	);
	assert!(matches!(result, Err(ConfigurationError::Parse(_))));
}

#[test]
fn test_define_from_config_rejects_repeated_names() {
	let config = FieldsConfig::from_toml_str(
		r#"
		[[fields]]
		name = "twice"

		[[fields]]
		name = "twice"
		"#,
	)
	.unwrap();

	let registry = FieldRegistry::with_builtins();
	assert!(matches!(
		registry.define_from_config(&config),
		Err(ConfigurationError::DuplicateField(name)) if name == "twice"
	));
	assert!(!registry.contains("twice"));
}

#[test]
fn test_define_from_config_is_atomic_under_concurrent_define() {
	let config = FieldsConfig {
		fields: (0..32)
			.map(|i| FieldSpec {
				name: format!("bulk-{i}"),
				inherit: true,
				propagate: false,
				merge: MergeStrategy::default(),
			})
			.collect(),
	};

	for _ in 0..64 {
		let registry = FieldRegistry::with_builtins();
		let (bulk, single) = std::thread::scope(|scope| {
			let bulk = scope.spawn(|| registry.define_from_config(&config));
			let single = scope.spawn(|| registry.define("bulk-16", FieldOptions::new()));
			(bulk.join().unwrap(), single.join().unwrap())
		});

		let registered = (0..32)
			.filter(|i| registry.contains(&format!("bulk-{i}")))
			.count();
		match (bulk, single) {
			(Ok(defined), Err(ConfigurationError::DuplicateField(_))) => {
				assert_eq!(defined.len(), 32);
				assert_eq!(registered, 32);
			}
			(Err(ConfigurationError::DuplicateField(_)), Ok(_)) => {
				assert_eq!(registered, 1);
			}
			(bulk, single) => panic!("unexpected outcome: {bulk:?} / {single:?}"),
		}
	}
}
