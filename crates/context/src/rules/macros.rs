//! Registration macro for link-time rule declarations.

/// Declares a rule picked up by
/// [`RuleRegistry::with_declared_rules`](crate::RuleRegistry::with_declared_rules).
///
/// The factory is a `fn() -> RuleRef` and runs lazily, on the first lookup
/// of the key.
///
/// ```ignore
/// fn selection_length() -> quill_context::RuleRef {
///     std::sync::Arc::new(SelectionLengthRule)
/// }
///
/// quill_context::data_rule!("selection_length", selection_length);
/// ```
#[macro_export]
macro_rules! data_rule {
	($key:expr, $factory:path $(,)?) => {
		$crate::inventory::submit! {
			$crate::rules::RuleDeclaration::new($key, $factory)
		}
	};
}
