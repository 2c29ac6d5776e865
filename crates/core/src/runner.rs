use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    interfaces::{RecipeArguments, RecipeInit},
    registry::{RecipeDescriptor, RecipeRegistry},
    types::{ExecutionRequest, ExecutionResult, InputPolicy, Output},
};
use tracing::{debug, info};

/// Resolves recipes by name and runs them
#[derive(Debug, Clone, Default)]
pub struct RecipeRunner {
    registry: RecipeRegistry,
}

impl RecipeRunner {
    /// A runner over the built-in recipes.
    pub fn new() -> Self {
        Self::with_registry(RecipeRegistry::with_builtins())
    }

    pub fn with_registry(registry: RecipeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RecipeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RecipeRegistry {
        &mut self.registry
    }

    /// Run one request to completion.
    ///
    /// Errors raised by the recipe itself are returned unchanged as
    /// [`Error::Recipe`].
    pub fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult> {
        let diagnostics = match &request.log {
            Some(path) => Diagnostics::with_log_file(&request.recipe, path)?,
            None => Diagnostics::new(&request.recipe),
        };

        let descriptor = self.registry.resolve(&request.recipe)?;
        validate(descriptor, &request)?;

        let convention = descriptor.calling_convention();
        debug!(
            recipe = %descriptor.name,
            policy = %descriptor.input_policy,
            %convention,
            arguments = request.arguments.len(),
            "building recipe"
        );

        let init = RecipeInit {
            input: request.input,
            document: request.document,
            logger: diagnostics,
            arguments: RecipeArguments::arrange(convention, request.arguments),
        };
        let mut recipe = (descriptor.factory)(init)?;
        recipe.patch()?;

        let output = recipe
            .take_patched()
            .or_else(|| recipe.take_document().map(Output::Document));
        info!(
            recipe = %descriptor.name,
            produced = output.is_some(),
            "recipe finished"
        );
        Ok(output)
    }
}

/// Check that the request carries what the recipe's policy needs.
///
/// A REQUIRED policy needs a non-empty `input`; every other policy needs a
/// document, whether or not `input` is present.
pub fn validate(descriptor: &RecipeDescriptor, request: &ExecutionRequest) -> Result<()> {
    match descriptor.input_policy {
        InputPolicy::Required => {
            if !request.has_input() {
                return Err(Error::validation(
                    &descriptor.name,
                    "'input' argument to be provided.",
                ));
            }
        }
        InputPolicy::Supported | InputPolicy::Ignored => {
            if request.document.is_none() {
                return Err(Error::validation(
                    &descriptor.name,
                    "'file' argument to be provided.",
                ));
            }
        }
    }
    Ok(())
}
