pub mod policy;
pub mod request;
pub mod schema;
pub mod signature;

// Re-export commonly used types
pub use policy::{CallingConvention, InputPolicy};
pub use request::{ExecutionRequest, ExecutionResult, Output, RequestFile};
pub use schema::{OutputDescriptor, ParameterSchema, RecipeDocumentation, TypeSpec};
pub use signature::{
    CONSTRUCTOR, CONTRACT_ARITY, ClassSignature, DefaultValue, MethodSignature, ParamDecl,
    RecipeModule, Scalar, TypeHint,
};
