//! MyLang type -> C++ type-name text.

use mylc_par::types::{BaseType, ParamUsage, PrimitiveType, Type};

fn primitive_cpp_name(p: PrimitiveType) -> &'static str {
    match p {
        PrimitiveType::I32 => "int",
        PrimitiveType::F32 => "float",
        PrimitiveType::Bool => "bool",
        PrimitiveType::Str => "std::string",
    }
}

fn base_cpp_name(base: &BaseType) -> String {
    match base {
        BaseType::Primitive(p) => primitive_cpp_name(*p).to_string(),
        BaseType::Struct(tok) => tok.lexeme.clone(),
        BaseType::Void => "void".to_string(),
        BaseType::Function { params, return_type } => {
            let ret = match return_type {
                Some(ty) => cpp_type_name(ty),
                None => "void".to_string(),
            };
            let args: Vec<String> = params.iter().map(|p| cpp_type_name(&p.ty)).collect();
            format!("std::function<{ret}({})>", args.join(", "))
        },
    }
}

/// Wraps `base` in nested `std::array<_, N>` per array dimension, innermost
/// dimension first (matching MyLang's left-to-right dimension order:
/// `i32[3][2]` is a 3-element array of 2-element `i32` arrays).
pub fn cpp_type_name(ty: &Type) -> String {
    let mut name = base_cpp_name(&ty.base);
    for &dim in ty.array_dims.iter().rev() {
        name = format!("std::array<{name}, {dim}>");
    }
    name
}

/// A by-value-vs-by-reference parameter declaration: `in` binds a const
/// reference, `out`/`inout` bind a mutable one.
pub fn cpp_param_decl(usage: ParamUsage, ty: &Type, name: &str) -> String {
    let type_name = cpp_type_name(ty);
    match usage {
        ParamUsage::In => format!("const {type_name}& {name}"),
        ParamUsage::Out | ParamUsage::InOut => format!("{type_name}& {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mylc_lex::{Token, TokenKind};
    use mylc_util::{SourcePos, Span};

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, Span::point(SourcePos::start()))
    }

    #[test]
    fn primitive_names_match_the_reference_mapping() {
        assert_eq!(cpp_type_name(&Type::scalar(BaseType::Primitive(PrimitiveType::I32))), "int");
        assert_eq!(cpp_type_name(&Type::scalar(BaseType::Primitive(PrimitiveType::F32))), "float");
        assert_eq!(cpp_type_name(&Type::scalar(BaseType::Primitive(PrimitiveType::Str))), "std::string");
    }

    #[test]
    fn struct_type_uses_its_declared_name() {
        let ty = Type::scalar(BaseType::Struct(ident("vec2")));
        assert_eq!(cpp_type_name(&ty), "vec2");
    }

    #[test]
    fn array_dims_nest_nearest_dimension_innermost() {
        let ty = Type::new(BaseType::Primitive(PrimitiveType::I32), vec![3, 2]);
        assert_eq!(cpp_type_name(&ty), "std::array<std::array<int, 2>, 3>");
    }

    #[test]
    fn in_param_is_const_ref_out_and_inout_are_mutable_ref() {
        let vec2 = Type::scalar(BaseType::Struct(ident("vec2")));
        assert_eq!(cpp_param_decl(ParamUsage::In, &vec2, "lhs"), "const vec2& lhs");
        assert_eq!(cpp_param_decl(ParamUsage::Out, &vec2, "out_v"), "vec2& out_v");
        assert_eq!(cpp_param_decl(ParamUsage::InOut, &vec2, "v"), "vec2& v");
    }
}
