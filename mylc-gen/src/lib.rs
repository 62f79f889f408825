//! C++ code generation for MyLang: one `.h`/`.cpp` pair per logical
//! module, driven by a populated `mylc_sem::ProgramEnvironment`.

mod error;
mod generator;
mod output_sink;
mod type_mapping;

pub use error::{CodegenError, CodegenResult};
pub use generator::CodeGenerator;
pub use output_sink::{BufferOutputSink, BufferSinkFactory, FileOutputSink, FileSinkFactory, OutputSink, OutputSinkFactory};
pub use type_mapping::{cpp_param_decl, cpp_type_name};

#[cfg(test)]
mod scenario_tests {
    use super::*;
    use mylc_par::Parser;
    use mylc_sem::{GlobalSymbolScanner, ProgramEnvironment};

    /// Scenario 3: a single-fragment module with one exported struct and
    /// one exported function produces the documented header/source pair.
    #[test]
    fn module_emission_scenario() {
        let source = "module vector;\n\
            export vec2 : struct = { x: f32; y: f32; }\n\
            export subtract : func = (lhs: in vec2, rhs: in vec2) -> vec2 { return lhs; }\n";
        let (parsed, handler) = Parser::parse_source(source);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        let module = parsed.unwrap();

        let mut env = ProgramEnvironment::new();
        GlobalSymbolScanner::new(&mut env).scan(&module).unwrap();

        let mut gen = CodeGenerator::new(&env, ".", Box::new(BufferSinkFactory));
        gen.generate(std::slice::from_ref(&module)).unwrap();

        let header = gen.content_of("vector.h").unwrap();
        assert!(header.starts_with("#ifndef MODULE_vector_H\n#define MODULE_vector_H\n#include <functional>\n"));
        assert!(header.contains("struct vec2 {\n    float x;\n    float y;\n};\n"));
        assert!(header.contains("vec2 subtract(const vec2& lhs, const vec2& rhs);\n"));
        assert!(header.ends_with("#endif // MODULE_vector_H\n"));

        let source_out = gen.content_of("vector.cpp").unwrap();
        assert!(source_out.starts_with("#include \"vector.h\"\n"));
        assert!(source_out.contains("vec2 subtract(const vec2& lhs, const vec2& rhs) {\n"));
    }

    /// Scenario 4: two fragments sharing a module name union their
    /// forward-declared globals into a single `.h`/`.cpp` pair.
    #[test]
    fn multi_fragment_module_unions_declarations() {
        let source_a = "module a;\nexport one : func = () -> i32 { return 1; }\n";
        let source_b = "module a;\nexport two : func = () -> i32 { return 2; }\n";

        let (parsed_a, handler_a) = Parser::parse_source(source_a);
        assert!(!handler_a.has_errors());
        let (parsed_b, handler_b) = Parser::parse_source(source_b);
        assert!(!handler_b.has_errors());
        let module_a = parsed_a.unwrap();
        let module_b = parsed_b.unwrap();

        let mut env = ProgramEnvironment::new();
        let mut scanner = GlobalSymbolScanner::new(&mut env);
        scanner.scan(&module_a).unwrap();
        scanner.scan(&module_b).unwrap();

        let mut gen = CodeGenerator::new(&env, ".", Box::new(BufferSinkFactory));
        gen.generate(&[module_a, module_b]).unwrap();

        let header = gen.content_of("a.h").unwrap();
        assert!(header.contains("int one();"));
        assert!(header.contains("int two();"));

        let source_out = gen.content_of("a.cpp").unwrap();
        assert!(source_out.contains("int one() {\n"));
        assert!(source_out.contains("int two() {\n"));
    }
}
