//! Walks parsed modules and a populated `ProgramEnvironment`, emitting one
//! `.h`/`.cpp` pair per logical module name.

use std::path::PathBuf;

use indexmap::IndexMap;
use mylc_par::ast::{
    ForInit, FuncDecl, GlobalDecl, JumpStmt, Module, Stmt, StructDecl, VarDeclStmt, VarInit,
};
use mylc_sem::{ProgramEnvironment, Symbol};
use rustc_hash::FxHashSet;

use crate::error::{CodegenError, CodegenResult};
use crate::output_sink::{OutputSink, OutputSinkFactory};
use crate::type_mapping::{cpp_param_decl, cpp_type_name};

fn header_guard_macro(module_name: &str) -> String {
    format!("MODULE_{module_name}_H")
}

fn header_file_name(module_name: &str) -> String {
    format!("{module_name}.h")
}

fn source_file_name(module_name: &str) -> String {
    format!("{module_name}.cpp")
}

fn include_header_macro(module_name: &str) -> String {
    format!("#include \"{}\"\n", header_file_name(module_name))
}

fn func_signature(f: &FuncDecl) -> String {
    let return_type = match &f.return_type {
        Some(ty) => cpp_type_name(ty),
        None => "void".to_string(),
    };
    let params: Vec<String> =
        f.params.iter().map(|p| cpp_param_decl(p.usage, &p.ty, &p.name.lexeme)).collect();
    format!("{return_type} {}({})", f.name.lexeme, params.join(", "))
}

pub struct CodeGenerator<'env> {
    env: &'env ProgramEnvironment,
    output_dir: PathBuf,
    sink_factory: Box<dyn OutputSinkFactory>,
    open_sinks: IndexMap<String, Box<dyn OutputSink>>,
    visited_modules: FxHashSet<String>,
}

impl<'env> CodeGenerator<'env> {
    pub fn new(
        env: &'env ProgramEnvironment,
        output_dir: impl Into<PathBuf>,
        sink_factory: Box<dyn OutputSinkFactory>,
    ) -> Self {
        Self {
            env,
            output_dir: output_dir.into(),
            sink_factory,
            open_sinks: IndexMap::new(),
            visited_modules: FxHashSet::default(),
        }
    }

    /// Emits every module fragment, then flushes and closes every file
    /// that was opened along the way.
    pub fn generate(&mut self, modules: &[Module]) -> CodegenResult<()> {
        for module in modules {
            self.visit_module(module)?;
        }
        self.close_all()
    }

    /// Retrieves the buffer sink's recorded text for a given generated
    /// file name, for tests built on `BufferSinkFactory`.
    pub fn content_of(&self, file_name: &str) -> Option<&str> {
        self.open_sinks.get(file_name).and_then(|sink| sink.as_buffer_content())
    }

    fn get_sink(&mut self, file_name: &str) -> CodegenResult<()> {
        if !self.open_sinks.contains_key(file_name) {
            let mut sink = self.sink_factory.create();
            let path = self.output_dir.join(file_name);
            sink.open(&path)?;
            self.open_sinks.insert(file_name.to_string(), sink);
        }
        Ok(())
    }

    fn sink_mut(&mut self, file_name: &str) -> &mut Box<dyn OutputSink> {
        self.open_sinks.get_mut(file_name).expect("get_sink must be called first")
    }

    fn close_all(&mut self) -> CodegenResult<()> {
        for sink in self.open_sinks.values_mut() {
            sink.close()?;
        }
        Ok(())
    }

    fn visit_module(&mut self, module: &Module) -> CodegenResult<()> {
        let module_name = module.name.lexeme.clone();

        if !self.visited_modules.contains(&module_name) {
            self.visited_modules.insert(module_name.clone());
            self.initialize_header(&module_name)?;
            self.initialize_source(&module_name)?;
        }

        let source_file = source_file_name(&module_name);
        for decl in &module.decls {
            if let GlobalDecl::Func(func) = decl {
                self.emit_func_definition(&source_file, func);
            }
        }

        Ok(())
    }

    fn initialize_header(&mut self, module_name: &str) -> CodegenResult<()> {
        let file_name = header_file_name(module_name);
        self.get_sink(&file_name)?;

        let info = self
            .env
            .module(module_name)
            .ok_or_else(|| CodegenError::UnknownModule(module_name.to_string()))?;

        let mut reexported: Vec<&str> = info.imports().filter(|(_, export)| *export).map(|(n, _)| n).collect();
        reexported.sort_unstable();

        let public_symbols: Vec<&Symbol> = info.symbol_table.global_public_symbols().collect();

        let guard = header_guard_macro(module_name);
        let sink = self.sink_mut(&file_name);
        sink.print(&format!("#ifndef {guard}\n"));
        sink.print(&format!("#define {guard}\n"));
        sink.print("#include <functional>\n");
        for name in reexported {
            sink.print(&include_header_macro(name));
        }
        for symbol in public_symbols {
            emit_forward_decl(sink, &symbol.decl);
        }
        sink.print(&format!("#endif // {guard}\n"));

        Ok(())
    }

    fn initialize_source(&mut self, module_name: &str) -> CodegenResult<()> {
        let file_name = source_file_name(module_name);
        self.get_sink(&file_name)?;

        let info = self
            .env
            .module(module_name)
            .ok_or_else(|| CodegenError::UnknownModule(module_name.to_string()))?;

        let mut private_imports: Vec<&str> =
            info.imports().filter(|(_, export)| !*export).map(|(n, _)| n).collect();
        private_imports.sort_unstable();

        let private_symbols: Vec<&Symbol> = info.symbol_table.global_private_symbols().collect();

        let sink = self.sink_mut(&file_name);
        sink.print(&include_header_macro(module_name));
        for name in private_imports {
            sink.print(&include_header_macro(name));
        }
        for symbol in private_symbols {
            emit_forward_decl(sink, &symbol.decl);
        }

        Ok(())
    }

    fn emit_func_definition(&mut self, source_file: &str, func: &FuncDecl) {
        let sink = self.sink_mut(source_file);
        sink.print(&func_signature(func));
        sink.print(" ");
        visit_stmt(sink.as_mut(), &func.body);
    }
}

/// Renders `decl` as a forward declaration: a `;`-terminated prototype for
/// a function, a full `struct { ... }` definition for a struct (C++
/// cannot forward-declare a by-value struct).
fn emit_forward_decl(sink: &mut dyn OutputSink, decl: &GlobalDecl) {
    match decl {
        GlobalDecl::Func(f) => {
            sink.print(&func_signature(f));
            sink.print(";\n");
        },
        GlobalDecl::Struct(s) => emit_struct_definition(sink, s),
    }
}

fn emit_struct_definition(sink: &mut dyn OutputSink, s: &StructDecl) {
    sink.print(&format!("struct {} {{\n", s.name.lexeme));
    sink.increase_depth();
    for member in &s.members {
        sink.print_indented(&format!("{} {};\n", cpp_type_name(&member.ty), member.name.lexeme));
    }
    sink.decrease_depth();
    sink.print("};\n");
}

fn visit_stmt(sink: &mut dyn OutputSink, stmt: &Stmt) {
    match stmt {
        Stmt::Compound(stmts) => {
            sink.print_indented("{\n");
            sink.increase_depth();
            for s in stmts {
                visit_stmt(sink, s);
            }
            sink.decrease_depth();
            sink.print_indented("}\n");
        },
        Stmt::If { condition, then_branch, else_branch } => {
            sink.print_indented(&format!("if ({}) ", condition.to_string_repr()));
            sink.disable_next_indent();
            visit_stmt(sink, then_branch);
            if let Some(else_branch) = else_branch {
                sink.print_indented("else ");
                sink.disable_next_indent();
                visit_stmt(sink, else_branch);
            }
        },
        Stmt::For { init, condition, increment, body } => visit_for(sink, init, condition, increment, body),
        Stmt::While { condition, body } => {
            sink.print_indented(&format!("while ({}) ", condition.to_string_repr()));
            sink.disable_next_indent();
            visit_stmt(sink, body);
        },
        Stmt::Jump(jump) => visit_jump(sink, jump),
        Stmt::VarDecl(decl) => visit_var_decl(sink, decl),
        Stmt::Expr(expr) => sink.print_indented(&format!("{};\n", expr.to_string_repr())),
    }
}

/// `for (init; cond; inc) body` desugars to a block so the initializer's
/// variable is scoped to the loop, not the enclosing block.
fn visit_for(
    sink: &mut dyn OutputSink,
    init: &ForInit,
    condition: &Option<Box<mylc_par::ast::Expr>>,
    increment: &Option<Box<mylc_par::ast::Expr>>,
    body: &Stmt,
) {
    sink.print_indented("{\n");
    sink.increase_depth();

    match init {
        ForInit::VarDecl(decl) => visit_var_decl(sink, decl),
        ForInit::Expr(expr) => sink.print_indented(&format!("{};\n", expr.to_string_repr())),
        ForInit::Empty => {},
    }

    sink.print_indented("while (true) {\n");
    sink.increase_depth();

    if let Some(condition) = condition {
        sink.print_indented(&format!("if ({} == false) break;\n", condition.to_string_repr()));
    }

    visit_stmt(sink, body);

    if let Some(increment) = increment {
        sink.print_indented(&increment.to_string_repr());
        sink.print(";\n");
    }

    sink.decrease_depth();
    sink.print_indented("}\n");

    sink.decrease_depth();
    sink.print_indented("}\n");
}

fn visit_jump(sink: &mut dyn OutputSink, jump: &JumpStmt) {
    match jump {
        JumpStmt::Return { value, .. } => {
            sink.print_indented("return");
            if let Some(value) = value {
                sink.print(&format!(" {}", value.to_string_repr()));
            }
            sink.print(";\n");
        },
        JumpStmt::Break { .. } => sink.print_indented("break;\n"),
        JumpStmt::Continue { .. } => sink.print_indented("continue;\n"),
    }
}

/// The outer brace pair is added here, on top of whatever `visit_var_init`
/// prints, only for array-typed declarations: a `VarInit::List` always
/// self-brackets its own elements, so a non-array struct initializer like
/// `vec2 result = {1.0, 2.0};` gets exactly one brace pair, while an array
/// declaration's outermost dimension needs this extra wrapping layer.
fn visit_var_decl(sink: &mut dyn OutputSink, decl: &VarDeclStmt) {
    let type_name = cpp_type_name(&decl.ty);
    sink.print_indented(&format!("{type_name} {}", decl.name.lexeme));

    sink.print(" = ");
    if decl.ty.is_array() {
        sink.print("{");
    }
    visit_var_init(sink, &decl.init);
    if decl.ty.is_array() {
        sink.print("}");
    }

    sink.print(";\n");
}

fn visit_var_init(sink: &mut dyn OutputSink, init: &VarInit) {
    match init {
        VarInit::Expr(expr) => sink.print(&expr.to_string_repr()),
        VarInit::List(elements) => {
            sink.print("{");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    sink.print(", ");
                }
                visit_var_init(sink, element);
            }
            sink.print("}");
        },
    }
}
