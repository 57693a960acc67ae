//! Resolved model descriptors.
//!
//! A [`ModelDef`](super::ModelDef) becomes an [`app::Model`](Model) at
//! registration time. Foreign key names, target models, and the accessor
//! dispatch table are all computed once here.

use super::model_def::{AssociationDefKind, ModelDef};

use stubdb_core::{bail, Name, Result};

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model, e.g. `address`
    pub name: Name,

    /// Backing collection, the pluralized model name
    pub collection: String,

    pub associations: Vec<Association>,

    /// Maps every synthesized accessor name to the association it serves
    accessors: IndexMap<String, Accessor>,
}

#[derive(Debug, Clone)]
pub struct Association {
    /// Name the association was declared with, e.g. `user` or `addresses`
    pub name: Name,

    pub kind: AssociationKind,
}

#[derive(Debug, Clone)]
pub enum AssociationKind {
    BelongsTo(BelongsTo),
    HasMany(HasMany),
}

#[derive(Debug, Clone)]
pub struct BelongsTo {
    /// Name of the parent model
    pub target: String,

    /// Foreign key attribute on the owning model, `<name>_id`
    pub foreign_key: String,
}

#[derive(Debug, Clone)]
pub struct HasMany {
    /// Name of the child model
    pub target: String,

    /// Singular item name
    pub singular: Name,

    /// Foreign key attribute on the child model, `<owner>_id`
    pub foreign_key: String,

    /// Id list accessor on the owning model, `<singular>_ids`
    pub ids_key: String,
}

/// What a synthesized accessor name resolves to. Each variant carries the
/// index of the association in [`Model::associations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// `<name>`: the related model(s)
    Association(usize),

    /// `<name>_id` on a `belongs_to`
    ForeignKey(usize),

    /// `<singular>_ids` on a `has_many`
    Ids(usize),

    /// `new<Name>` / `new_<name>`
    New(usize),

    /// `create<Name>` / `create_<name>`
    Create(usize),
}

impl Model {
    pub(crate) fn from_def(name: &str, def: &ModelDef) -> Result<Model> {
        let name = Name::new(name);
        let collection = name.plural().snake_case();

        let associations = def
            .associations
            .iter()
            .map(|assoc| {
                let assoc_name = Name::new(&assoc.name);
                let kind = match assoc.kind {
                    AssociationDefKind::BelongsTo => AssociationKind::BelongsTo(BelongsTo {
                        target: assoc
                            .target
                            .as_deref()
                            .map(|target| Name::new(target).snake_case())
                            .unwrap_or_else(|| assoc_name.snake_case()),
                        foreign_key: format!("{}_id", assoc_name.snake_case()),
                    }),
                    AssociationDefKind::HasMany => {
                        let singular = assoc_name.singular();
                        AssociationKind::HasMany(HasMany {
                            target: assoc
                                .target
                                .as_deref()
                                .map(|target| Name::new(target).snake_case())
                                .unwrap_or_else(|| singular.snake_case()),
                            foreign_key: format!("{}_id", name.snake_case()),
                            ids_key: format!("{}_ids", singular.snake_case()),
                            singular,
                        })
                    }
                };
                Association {
                    name: assoc_name,
                    kind,
                }
            })
            .collect::<Vec<_>>();

        let mut model = Model {
            name,
            collection,
            associations,
            accessors: IndexMap::new(),
        };
        model.build_accessors()?;
        Ok(model)
    }

    fn build_accessors(&mut self) -> Result<()> {
        let mut accessors = IndexMap::new();

        for (index, assoc) in self.associations.iter().enumerate() {
            let singular = assoc.singular();
            let names = [
                (assoc.name.snake_case(), Accessor::Association(index)),
                (assoc.key_accessor().to_string(), assoc.key_accessor_kind(index)),
                (format!("new{}", singular.upper_camel_case()), Accessor::New(index)),
                (format!("new_{}", singular.snake_case()), Accessor::New(index)),
                (format!("create{}", singular.upper_camel_case()), Accessor::Create(index)),
                (format!("create_{}", singular.snake_case()), Accessor::Create(index)),
            ];

            for (name, accessor) in names {
                if name == "id" {
                    bail!("association `{}` on `{}` would shadow `id`", assoc.name, self.name);
                }
                if let Some(existing) = accessors.insert(name.clone(), accessor) {
                    if existing != accessor {
                        bail!(
                            "accessor `{name}` on `{}` is defined by more than one association",
                            self.name
                        );
                    }
                }
            }
        }

        self.accessors = accessors;
        Ok(())
    }

    pub fn accessor(&self, name: &str) -> Option<Accessor> {
        self.accessors.get(name).copied()
    }

    pub fn association(&self, index: usize) -> &Association {
        &self.associations[index]
    }

    pub fn association_by_name(&self, name: &str) -> Option<(usize, &Association)> {
        match self.accessor(name)? {
            Accessor::Association(index) => Some((index, &self.associations[index])),
            _ => None,
        }
    }

    /// Iterates the `belongs_to` associations with their indices.
    pub fn belongs_tos(&self) -> impl Iterator<Item = (usize, &BelongsTo)> + '_ {
        self.associations
            .iter()
            .enumerate()
            .filter_map(|(index, assoc)| match &assoc.kind {
                AssociationKind::BelongsTo(belongs_to) => Some((index, belongs_to)),
                _ => None,
            })
    }

    /// Iterates the `has_many` associations with their indices.
    pub fn has_manys(&self) -> impl Iterator<Item = (usize, &HasMany)> + '_ {
        self.associations
            .iter()
            .enumerate()
            .filter_map(|(index, assoc)| match &assoc.kind {
                AssociationKind::HasMany(has_many) => Some((index, has_many)),
                _ => None,
            })
    }
}

impl Association {
    pub fn target(&self) -> &str {
        match &self.kind {
            AssociationKind::BelongsTo(belongs_to) => &belongs_to.target,
            AssociationKind::HasMany(has_many) => &has_many.target,
        }
    }

    pub fn expect_belongs_to(&self) -> &BelongsTo {
        match &self.kind {
            AssociationKind::BelongsTo(belongs_to) => belongs_to,
            kind => panic!("expected BelongsTo; actual={kind:#?}"),
        }
    }

    pub fn expect_has_many(&self) -> &HasMany {
        match &self.kind {
            AssociationKind::HasMany(has_many) => has_many,
            kind => panic!("expected HasMany; actual={kind:#?}"),
        }
    }

    fn singular(&self) -> Name {
        match &self.kind {
            AssociationKind::BelongsTo(_) => self.name.clone(),
            AssociationKind::HasMany(has_many) => has_many.singular.clone(),
        }
    }

    fn key_accessor(&self) -> &str {
        match &self.kind {
            AssociationKind::BelongsTo(belongs_to) => &belongs_to.foreign_key,
            AssociationKind::HasMany(has_many) => &has_many.ids_key,
        }
    }

    fn key_accessor_kind(&self, index: usize) -> Accessor {
        match &self.kind {
            AssociationKind::BelongsTo(_) => Accessor::ForeignKey(index),
            AssociationKind::HasMany(_) => Accessor::Ids(index),
        }
    }
}
