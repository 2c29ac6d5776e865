//! Name-keyed registry of recipes
//!
//! Resolution is a lookup: a recipe is found by its name, then its entry type
//! by class name. Each descriptor carries the recipe's input policy, calling
//! convention and declared signatures.

use crate::{
    error::{Error, Result},
    interfaces::{RecipeFactory, SignatureSource},
    types::{CallingConvention, ClassSignature, InputPolicy, MethodSignature, RecipeModule},
};
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

/// Conventional name of a recipe's entry type.
pub const ENTRY_CLASS: &str = "Patcher";

/// Everything the runner needs to know about one recipe
#[derive(Clone)]
pub struct RecipeDescriptor {
    pub name: String,
    pub input_policy: InputPolicy,
    convention: Option<CallingConvention>,
    pub factory: RecipeFactory,
    /// Declared signatures of the entry type.
    pub entry: ClassSignature,
}

impl fmt::Debug for RecipeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeDescriptor")
            .field("name", &self.name)
            .field("input_policy", &self.input_policy)
            .field("convention", &self.convention)
            .field("entry", &self.entry.name)
            .finish()
    }
}

impl RecipeDescriptor {
    pub fn new(name: &str, factory: RecipeFactory) -> Self {
        Self {
            name: name.to_string(),
            input_policy: InputPolicy::default(),
            convention: None,
            factory,
            entry: ClassSignature::new(ENTRY_CLASS),
        }
    }

    pub fn with_input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = policy;
        self
    }

    pub fn with_convention(mut self, convention: CallingConvention) -> Self {
        self.convention = Some(convention);
        self
    }

    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.entry.name = class_name.to_string();
        self
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.entry = self.entry.method(method);
        self
    }

    pub fn constructor(&self) -> Option<&MethodSignature> {
        self.entry.constructor()
    }

    /// The declared convention, or the legacy inference from whether the
    /// constructor is documented.
    pub fn calling_convention(&self) -> CallingConvention {
        if let Some(convention) = self.convention {
            return convention;
        }
        let documented = self.constructor().is_some_and(|c| c.doc.is_some());
        let inferred = CallingConvention::inferred(documented);
        debug!(
            recipe = %self.name,
            "no calling convention declared, inferred {} from constructor documentation",
            inferred
        );
        inferred
    }
}

/// Registry mapping recipe names to descriptors
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
    recipes: IndexMap<String, RecipeDescriptor>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in recipes.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::recipes::register_all(&mut registry);
        registry
    }

    /// Register a recipe, replacing any previous one of the same name.
    pub fn register(&mut self, descriptor: RecipeDescriptor) -> Option<RecipeDescriptor> {
        debug!(recipe = %descriptor.name, "registering recipe");
        self.recipes.insert(descriptor.name.clone(), descriptor)
    }

    pub fn resolve(&self, name: &str) -> Result<&RecipeDescriptor> {
        self.recipes
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn input_policy_of(&self, name: &str) -> Result<InputPolicy> {
        Ok(self.resolve(name)?.input_policy)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RecipeDescriptor> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl SignatureSource for RecipeRegistry {
    fn load_module(&self, recipe: &str) -> Result<RecipeModule> {
        let descriptor = self.resolve(recipe)?;
        Ok(RecipeModule::new(recipe).class(descriptor.entry.clone()))
    }
}
