//! Per-render evaluation state.

use std::mem;

use crate::interpreter::scope::ScopeChain;
use crate::options::RenderOptions;
use crate::types::Value;
use crate::warning::RenderWarning;

/// State carried through one render call.
///
/// Owns the scope chain and the warnings collected so far. Nothing here
/// outlives the call, so concurrent renders share no mutable state.
pub struct EvalContext<'v, 'o> {
    scope: ScopeChain<'v>,
    options: &'o RenderOptions,
    warnings: Vec<RenderWarning>,
}

impl<'v, 'o> EvalContext<'v, 'o> {
    pub fn new(context: &'v Value, options: &'o RenderOptions) -> Self {
        Self {
            scope: ScopeChain::new(context),
            options,
            warnings: Vec::new(),
        }
    }

    pub fn scope(&self) -> &ScopeChain<'v> {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut ScopeChain<'v> {
        &mut self.scope
    }

    pub fn options(&self) -> &'o RenderOptions {
        self.options
    }

    /// Records a warning unless an identical one was already recorded.
    ///
    /// A directive inside a loop body therefore warns once, not once per
    /// iteration.
    pub fn add_warning(&mut self, warning: RenderWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Drains all collected warnings.
    pub fn take_warnings(&mut self) -> Vec<RenderWarning> {
        mem::take(&mut self.warnings)
    }
}
