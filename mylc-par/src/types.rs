//! The MyLang type system: a base type plus an ordered sequence of array
//! dimensions.

use mylc_lex::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    I32,
    F32,
    Bool,
    Str,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::I32 => "i32",
            PrimitiveType::F32 => "f32",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Str => "str",
        }
    }
}

/// One parameter's passing discipline. `In` binds a read-only reference
/// at the C++ level; `Out`/`InOut` bind a mutable one (see the generator's
/// parameter-usage mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUsage {
    In,
    Out,
    InOut,
}

/// A parameter's usage plus its type, as it appears in a function type or
/// parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamType {
    pub usage: ParamUsage,
    pub ty: Type,
}

/// The base (non-array) part of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseType {
    Primitive(PrimitiveType),
    /// Named by a struct declaration elsewhere in (or imported into) the
    /// module; validity is checked during semantic analysis, not parsing.
    Struct(Token),
    Function { params: Vec<ParamType>, return_type: Option<Box<Type>> },
    /// Only valid in a function's return-type position.
    Void,
}

impl BaseType {
    pub fn name(&self) -> String {
        match self {
            BaseType::Primitive(p) => p.name().to_string(),
            BaseType::Struct(tok) => tok.lexeme.clone(),
            BaseType::Function { .. } => "func".to_string(),
            BaseType::Void => "void".to_string(),
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, BaseType::Struct(_))
    }
}

/// A base type together with its (possibly empty) array dimensions.
/// Dimensions grow to the right: `i32[3][2]` is a length-3 array of
/// length-2 `i32` arrays, represented as `array_dims = [3, 2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub base: BaseType,
    pub array_dims: Vec<u32>,
}

impl Type {
    pub fn new(base: BaseType, array_dims: Vec<u32>) -> Self {
        Self { base, array_dims }
    }

    pub fn scalar(base: BaseType) -> Self {
        Self::new(base, Vec::new())
    }

    pub fn is_array(&self) -> bool {
        !self.array_dims.is_empty()
    }

    /// The type of `self[i]`: drops the leftmost array dimension.
    /// Panics if called on a non-array type; callers must check
    /// `is_array()` first (enforced by the type checker before codegen
    /// ever needs this).
    pub fn remove_leftmost_dim(&self) -> Type {
        assert!(self.is_array(), "remove_leftmost_dim on a non-array type");
        Type::new(self.base.clone(), self.array_dims[1..].to_vec())
    }
}
