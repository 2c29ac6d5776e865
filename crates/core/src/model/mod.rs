//! In-memory building model parsed from an ISO-10303-21 file.
//!
//! The model keeps header statements verbatim and data instances in file
//! order. Attribute lists are stored as raw text; only entity references are
//! interpreted.

pub mod step;

use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

static INSTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^#(\d+)\s*=\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)$")
        .expect("instance pattern is a valid regex")
});

/// One data instance such as `#12=IFCWALL(...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: u64,
    /// Class name as written in the file, usually upper case.
    pub class: String,
    /// Attribute list without the surrounding parentheses.
    pub arguments: String,
}

impl Entity {
    pub fn new(id: u64, class: &str, arguments: &str) -> Self {
        Self {
            id,
            class: class.to_string(),
            arguments: arguments.to_string(),
        }
    }

    pub fn is_a(&self, class: &str) -> bool {
        self.class.eq_ignore_ascii_case(class)
    }

    pub fn references(&self) -> Vec<u64> {
        step::references(&self.arguments)
    }

    fn to_step(&self) -> String {
        format!("#{}={}({});", self.id, self.class, self.arguments)
    }
}

/// A parsed model document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    header: Vec<String>,
    entities: IndexMap<u64, Entity>,
}

impl Model {
    /// An empty model with a minimal header for `schema`.
    pub fn new(schema: &str) -> Self {
        Self {
            header: vec![
                "FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1')".to_string(),
                "FILE_NAME('','',(''),(''),'patchbay','patchbay','')".to_string(),
                format!("FILE_SCHEMA(('{schema}'))"),
            ],
            entities: IndexMap::new(),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map_err(|e| Error::ParseError(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let statements = step::split_statements(text)?;
        let mut statements = statements.into_iter();

        match statements.next() {
            Some(first) if first == "ISO-10303-21" => {}
            _ => {
                return Err(Error::ParseError(
                    "missing ISO-10303-21 preamble".to_string(),
                ));
            }
        }

        #[derive(PartialEq)]
        enum Section {
            None,
            Header,
            Data,
        }

        let mut section = Section::None;
        let mut header = Vec::new();
        let mut entities = IndexMap::new();
        let mut finished = false;

        for statement in statements {
            if finished {
                return Err(Error::ParseError(format!(
                    "content after END-ISO-10303-21: {statement}"
                )));
            }
            match statement.as_str() {
                "HEADER" if section == Section::None => section = Section::Header,
                "ENDSEC" if section != Section::None => section = Section::None,
                "END-ISO-10303-21" if section == Section::None => finished = true,
                s if section == Section::None && s.starts_with("DATA") => section = Section::Data,
                s if section == Section::Header => header.push(s.to_string()),
                s if section == Section::Data => {
                    let entity = parse_instance(s)?;
                    if entities.insert(entity.id, entity).is_some() {
                        return Err(Error::ParseError(format!("duplicate instance in {s}")));
                    }
                }
                s => {
                    return Err(Error::ParseError(format!("unexpected statement: {s}")));
                }
            }
        }

        if !finished {
            return Err(Error::ParseError(
                "missing END-ISO-10303-21 terminator".to_string(),
            ));
        }

        Ok(Self { header, entities })
    }

    /// Serialize the model to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_step())?;
        Ok(())
    }

    pub fn to_step(&self) -> String {
        let mut out = String::from("ISO-10303-21;\nHEADER;\n");
        for statement in &self.header {
            out.push_str(statement);
            out.push_str(";\n");
        }
        out.push_str("ENDSEC;\nDATA;\n");
        for entity in self.entities.values() {
            out.push_str(&entity.to_step());
            out.push('\n');
        }
        out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
        out
    }

    /// Schema identifier from `FILE_SCHEMA`, e.g. `IFC4`.
    pub fn schema(&self) -> Option<String> {
        self.header
            .iter()
            .find(|s| s.starts_with("FILE_SCHEMA"))
            .and_then(|s| step::first_string(s))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn entity(&self, id: u64) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn by_type<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.values().filter(move |e| e.is_a(class))
    }

    pub fn add(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.id, entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The given ids plus every instance they reach through references.
    /// Dangling references are ignored.
    pub fn closure<I>(&self, roots: I) -> HashSet<u64>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut seen = HashSet::new();
        let mut stack: Vec<u64> = roots.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(entity) = self.entities.get(&id) else {
                continue;
            };
            if seen.insert(id) {
                stack.extend(entity.references());
            }
        }
        seen
    }

    /// A copy with the same header holding only the instances in `ids`.
    pub fn subset(&self, ids: &HashSet<u64>) -> Model {
        Model {
            header: self.header.clone(),
            entities: self
                .entities
                .iter()
                .filter(|(id, _)| ids.contains(id))
                .map(|(id, e)| (*id, e.clone()))
                .collect(),
        }
    }
}

fn parse_instance(statement: &str) -> Result<Entity> {
    let caps = INSTANCE
        .captures(statement)
        .ok_or_else(|| Error::ParseError(format!("unsupported instance: {statement}")))?;
    let id = caps[1]
        .parse()
        .map_err(|e| Error::ParseError(format!("invalid instance id in {statement}: {e}")))?;
    Ok(Entity::new(id, &caps[2], &caps[3]))
}
