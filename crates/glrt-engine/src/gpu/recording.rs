//! In-memory [`Gl`] used by the unit tests.
//!
//! Behaves like a tiny GLSL driver: sources are checked for basic
//! well-formedness, `struct`/`uniform` declarations are reflected into active
//! uniforms at link time, and uniform writes land in a name-keyed store that
//! tests can read back. Every call is appended to a log so tests can assert
//! ordering.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{Capability, Gl};
use crate::shader::ShaderStage;
use crate::uniforms::UniformValue;

pub(crate) const INVALID_OPERATION: u32 = 0x0502;

struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
    deleted: bool,
}

#[derive(Default)]
struct ProgramObject {
    attached: Vec<u32>,
    attribs: Vec<(u32, String)>,
    linked: bool,
    log: String,
    uniforms: HashMap<String, i32>,
    deleted: bool,
}

#[derive(Default)]
pub(crate) struct RecordingGl {
    shaders: RefCell<Vec<ShaderObject>>,
    programs: RefCell<Vec<ProgramObject>>,
    current: Cell<Option<u32>>,
    next_location: Cell<i32>,
    location_names: RefCell<HashMap<i32, String>>,
    values: RefCell<HashMap<String, UniformValue>>,
    writes: Cell<usize>,
    buffers: RefCell<Vec<Vec<u8>>>,
    bound_buffer: Cell<Option<u32>>,
    disabled: RefCell<Vec<Capability>>,
    draws: RefCell<Vec<(i32, i32)>>,
    error: Cell<u32>,
    calls: RefCell<Vec<String>>,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Value last written to the uniform `name`, or `None` if never written
    /// (the GPU default, all zeros).
    pub(crate) fn uniform_value(&self, name: &str) -> Option<UniformValue> {
        self.values.borrow().get(name).copied()
    }

    pub(crate) fn uniform_writes(&self) -> usize {
        self.writes.get()
    }

    /// Snapshot of every written uniform, sorted by name.
    pub(crate) fn uniform_state(&self) -> Vec<(String, UniformValue)> {
        let mut state: Vec<_> = self
            .values
            .borrow()
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect();
        state.sort_by(|a, b| a.0.cmp(&b.0));
        state
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Position of the first logged call starting with `prefix`.
    pub(crate) fn call_index(&self, prefix: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c.starts_with(prefix))
    }

    pub(crate) fn live_shaders(&self) -> usize {
        self.shaders.borrow().iter().filter(|s| !s.deleted).count()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.programs.borrow().iter().filter(|p| !p.deleted).count()
    }

    pub(crate) fn current_program(&self) -> Option<u32> {
        self.current.get()
    }

    pub(crate) fn attrib_bindings(&self, program: u32) -> Vec<(u32, String)> {
        self.programs
            .borrow()
            .get(program as usize - 1)
            .map(|p| p.attribs.clone())
            .unwrap_or_default()
    }

    pub(crate) fn disabled(&self) -> Vec<Capability> {
        self.disabled.borrow().clone()
    }

    pub(crate) fn draws(&self) -> Vec<(i32, i32)> {
        self.draws.borrow().clone()
    }

    pub(crate) fn buffer_contents(&self, buffer: u32) -> Vec<u8> {
        self.buffers
            .borrow()
            .get(buffer as usize - 1)
            .cloned()
            .unwrap_or_default()
    }

    /// Raises the error flag as if a previous call had failed.
    pub(crate) fn raise_error(&self, code: u32) {
        self.error.set(code);
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn write(&self, location: &i32, value: UniformValue) {
        self.writes.set(self.writes.get() + 1);

        let Some(program) = self.current.get() else {
            self.error.set(INVALID_OPERATION);
            return;
        };
        let name = self.location_names.borrow().get(location).cloned();
        let owned = name.as_ref().is_some_and(|n| {
            self.programs.borrow()[program as usize - 1].uniforms.get(n) == Some(location)
        });
        match name {
            Some(name) if owned => {
                self.values.borrow_mut().insert(name, value);
            }
            _ => self.error.set(INVALID_OPERATION),
        }
    }
}

// ── source checks ─────────────────────────────────────────────────────────

fn check_source(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("0:1: error: empty translation unit".to_string());
    }

    let mut braces = 0i32;
    let mut parens = 0i32;
    for (index, line) in source.lines().enumerate() {
        let line = strip_comment(line);
        for ch in line.chars() {
            match ch {
                '{' => braces += 1,
                '}' => braces -= 1,
                '(' => parens += 1,
                ')' => parens -= 1,
                _ => {}
            }
            if braces < 0 || parens < 0 {
                return Err(format!("0:{}: error: syntax error, unexpected '{ch}'", index + 1));
            }
        }
    }
    if braces != 0 || parens != 0 {
        let last = source.lines().count();
        return Err(format!("0:{last}: error: syntax error, unexpected end of file"));
    }

    if !source.contains("main(") && !source.contains("main (") {
        return Err("0:1: error: missing entry point 'main'".to_string());
    }
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    line.split("//").next().unwrap_or("")
}

// ── reflection ────────────────────────────────────────────────────────────

/// Active uniform names declared by `source`, in declaration order.
///
/// Struct-typed uniforms expand to one name per member (and per element for
/// arrays); array lengths may reference `#define`d constants. Like a real
/// compiler, declarations the code never reads are dropped: a uniform is
/// active only if its name is used outside declarations, and a struct member
/// only if `.member` is.
fn reflect_uniforms(source: &str) -> Vec<String> {
    let mut defines = HashMap::new();
    let mut body = String::new();
    for line in source.lines() {
        let line = strip_comment(line);
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("#define") {
            let mut parts = rest.split_whitespace();
            if let (Some(name), Some(value)) = (parts.next(), parts.next()) {
                defines.insert(name.to_string(), value.to_string());
            }
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }
        body.push_str(line);
        body.push('\n');
    }

    let (structs, code) = reflect_structs(&body);

    let mut usage = String::new();
    let mut declared = Vec::new();
    for statement in code.split(';') {
        let tail = statement.rsplit(['{', '}']).next().unwrap_or("");
        match tail.trim().strip_prefix("uniform") {
            Some(decl) => {
                usage.push_str(&statement[..statement.len() - tail.len()]);
                declared.push(decl.to_string());
            }
            None => usage.push_str(statement),
        }
        usage.push(';');
    }

    let mut names = Vec::new();
    for decl in &declared {
        let mut tokens = decl.split_whitespace();
        let (Some(ty), Some(declarator)) = (tokens.next(), tokens.next()) else {
            continue;
        };

        let (name, len) = match declarator.split_once('[') {
            Some((name, len)) => {
                let len = len.trim_end_matches(']');
                let len = defines.get(len).map(String::as_str).unwrap_or(len);
                (name, len.parse::<usize>().ok())
            }
            None => (declarator, None),
        };
        if !mentions(&usage, name) {
            continue;
        }

        let prefixes: Vec<String> = match len {
            Some(len) => (0..len).map(|i| format!("{name}[{i}]")).collect(),
            None => vec![name.to_string()],
        };

        match structs.get(ty) {
            Some(fields) => {
                let read: Vec<&String> = fields
                    .iter()
                    .filter(|field| mentions(&usage, &format!(".{field}")))
                    .collect();
                for prefix in &prefixes {
                    for field in &read {
                        names.push(format!("{prefix}.{field}"));
                    }
                }
            }
            None => names.extend(prefixes),
        }
    }
    names
}

/// Whether `word` occurs in `code` not glued to a longer identifier.
fn mentions(code: &str, word: &str) -> bool {
    let ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    code.match_indices(word).any(|(at, _)| {
        let before = code[..at].chars().next_back();
        let after = code[at + word.len()..].chars().next();
        !before.is_some_and(|c| ident(c) && !word.starts_with('.'))
            && !after.is_some_and(ident)
    })
}

fn varyings(source: &str) -> Vec<String> {
    source
        .lines()
        .map(strip_comment)
        .filter_map(|line| line.trim().strip_prefix("varying "))
        .filter_map(|decl| decl.trim_end_matches(';').split_whitespace().last())
        .map(str::to_string)
        .collect()
}

/// First varying read by a fragment stage that no vertex stage declares.
fn unmatched_varying(attached: &[&ShaderObject]) -> Option<String> {
    let written: Vec<String> = attached
        .iter()
        .filter(|s| s.stage == ShaderStage::Vertex)
        .flat_map(|s| varyings(&s.source))
        .collect();
    attached
        .iter()
        .filter(|s| s.stage == ShaderStage::Fragment)
        .flat_map(|s| varyings(&s.source))
        .find(|name| !written.contains(name))
}

/// Struct member lists by type name, and `body` with the struct definitions
/// cut out.
fn reflect_structs(body: &str) -> (HashMap<String, Vec<String>>, String) {
    let mut structs = HashMap::new();
    let mut code = String::new();
    let mut rest = body;
    while let Some(start) = rest.find("struct ") {
        let after = &rest[start + "struct ".len()..];
        let (Some(open), Some(close)) = (after.find('{'), after.find('}')) else {
            break;
        };
        let name = after[..open].trim().to_string();
        let fields = after[open + 1..close]
            .split(';')
            .filter_map(|decl| decl.split_whitespace().last())
            .map(str::to_string)
            .collect();
        structs.insert(name, fields);
        code.push_str(&rest[..start]);
        rest = &after[close + 1..];
    }
    code.push_str(rest);
    (structs, code)
}

// ── Gl impl ───────────────────────────────────────────────────────────────

impl Gl for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = i32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut shaders = self.shaders.borrow_mut();
        shaders.push(ShaderObject {
            stage,
            source: String::new(),
            compiled: false,
            log: String::new(),
            deleted: false,
        });
        let id = shaders.len() as u32;
        self.log(format!("create_shader({stage:?}) -> {id}"));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.log(format!("shader_source({shader})"));
        self.shaders.borrow_mut()[shader as usize - 1].source = source.to_string();
    }

    fn compile_shader(&self, shader: u32) {
        self.log(format!("compile_shader({shader})"));
        let mut shaders = self.shaders.borrow_mut();
        let object = &mut shaders[shader as usize - 1];
        match check_source(&object.source) {
            Ok(()) => {
                object.compiled = true;
                object.log.clear();
            }
            Err(log) => {
                object.compiled = false;
                object.log = log;
            }
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders.borrow()[shader as usize - 1].compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders.borrow()[shader as usize - 1].log.clone()
    }

    fn delete_shader(&self, shader: u32) {
        self.log(format!("delete_shader({shader})"));
        self.shaders.borrow_mut()[shader as usize - 1].deleted = true;
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut programs = self.programs.borrow_mut();
        programs.push(ProgramObject::default());
        let id = programs.len() as u32;
        self.log(format!("create_program() -> {id}"));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.log(format!("attach_shader({program}, {shader})"));
        self.programs.borrow_mut()[program as usize - 1]
            .attached
            .push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.log(format!("detach_shader({program}, {shader})"));
        self.programs.borrow_mut()[program as usize - 1]
            .attached
            .retain(|s| *s != shader);
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        self.log(format!("bind_attrib_location({program}, {index}, {name})"));
        self.programs.borrow_mut()[program as usize - 1]
            .attribs
            .push((index, name.to_string()));
    }

    fn link_program(&self, program: u32) {
        self.log(format!("link_program({program})"));
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let object = &mut programs[program as usize - 1];

        let attached: Vec<&ShaderObject> = object
            .attached
            .iter()
            .map(|id| &shaders[*id as usize - 1])
            .collect();

        let failure = if attached.iter().any(|s| !s.compiled) {
            Some("error: attached shader is not compiled".to_string())
        } else if !attached.iter().any(|s| s.stage == ShaderStage::Vertex) {
            Some("error: program has no vertex stage".to_string())
        } else if !attached.iter().any(|s| s.stage == ShaderStage::Fragment) {
            Some("error: program has no fragment stage".to_string())
        } else {
            unmatched_varying(&attached)
                .map(|name| format!("error: varying '{name}' not written by vertex shader"))
        };

        if let Some(log) = failure {
            object.linked = false;
            object.log = log;
            return;
        }

        object.linked = true;
        object.log.clear();
        object.uniforms.clear();
        let mut location_names = self.location_names.borrow_mut();
        for shader in attached {
            for name in reflect_uniforms(&shader.source) {
                if object.uniforms.contains_key(&name) {
                    continue;
                }
                let location = self.next_location.get();
                self.next_location.set(location + 1);
                location_names.insert(location, name.clone());
                object.uniforms.insert(name, location);
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs.borrow()[program as usize - 1].linked
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs.borrow()[program as usize - 1].log.clone()
    }

    fn use_program(&self, program: Option<u32>) {
        self.log(format!("use_program({program:?})"));
        self.current.set(program);
    }

    fn delete_program(&self, program: u32) {
        self.log(format!("delete_program({program})"));
        self.programs.borrow_mut()[program as usize - 1].deleted = true;
        if self.current.get() == Some(program) {
            self.current.set(None);
        }
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<i32> {
        let programs = self.programs.borrow();
        let object = &programs[program as usize - 1];
        if !object.linked {
            return None;
        }
        object.uniforms.get(name).copied()
    }

    fn uniform_1_i32(&self, location: &i32, x: i32) {
        self.write(location, UniformValue::Int(x));
    }

    fn uniform_1_f32(&self, location: &i32, x: f32) {
        self.write(location, UniformValue::Float(x));
    }

    fn uniform_2_f32(&self, location: &i32, x: f32, y: f32) {
        self.write(location, UniformValue::Vec2([x, y]));
    }

    fn uniform_3_f32(&self, location: &i32, x: f32, y: f32, z: f32) {
        self.write(location, UniformValue::Vec3([x, y, z]));
    }

    fn disable(&self, capability: Capability) {
        self.log(format!("disable({capability:?})"));
        self.disabled.borrow_mut().push(capability);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.log(format!("viewport({x}, {y}, {width}, {height})"));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.log(format!("clear_color({r}, {g}, {b}, {a})"));
    }

    fn clear_color_buffer(&self) {
        self.log("clear_color_buffer()".to_string());
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut buffers = self.buffers.borrow_mut();
        buffers.push(Vec::new());
        Ok(buffers.len() as u32)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.log(format!("bind_array_buffer({buffer:?})"));
        self.bound_buffer.set(buffer);
    }

    fn array_buffer_data(&self, data: &[u8]) {
        match self.bound_buffer.get() {
            Some(buffer) => self.buffers.borrow_mut()[buffer as usize - 1] = data.to_vec(),
            None => self.error.set(INVALID_OPERATION),
        }
    }

    fn delete_buffer(&self, buffer: u32) {
        self.log(format!("delete_buffer({buffer})"));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32) {
        self.log(format!("vertex_attrib_pointer_f32({index}, {components})"));
        if self.bound_buffer.get().is_none() {
            self.error.set(INVALID_OPERATION);
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.log(format!("enable_vertex_attrib_array({index})"));
    }

    fn draw_triangles(&self, first: i32, count: i32) {
        self.log(format!("draw_triangles({first}, {count})"));
        if self.current.get().is_none() {
            self.error.set(INVALID_OPERATION);
            return;
        }
        self.draws.borrow_mut().push((first, count));
    }

    fn error(&self) -> u32 {
        self.error.replace(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflects_struct_array_with_define() {
        let src = "#version 120\n#define N 2\nstruct S { int a; vec3 b; };\nuniform S s[N];\nuniform vec2 size;\nvoid main() { gl_FragColor = vec4(s[0].b * float(s[1].a), size.x); }\n";
        assert_eq!(
            reflect_uniforms(src),
            vec!["s[0].a", "s[0].b", "s[1].a", "s[1].b", "size"]
        );
    }

    #[test]
    fn unread_declarations_are_inactive() {
        let src = "struct S { int a; vec3 b; float ab; };\nuniform S s[2];\nuniform vec2 size;\nuniform float sizes;\nvoid main() { gl_FragColor = vec4(s[0].b, sizes); }\n";
        assert_eq!(reflect_uniforms(src), vec!["s[0].b", "s[1].b", "sizes"]);
    }

    #[test]
    fn rejects_unbalanced_source() {
        assert!(check_source("void main() {").is_err());
        assert!(check_source("void main() }").is_err());
        assert!(check_source("   ").is_err());
        assert!(check_source("void main() {}").is_ok());
    }
}
