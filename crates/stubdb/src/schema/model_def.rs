/// Declares a model type's associations before registration.
///
/// ```
/// use stubdb::ModelDef;
///
/// let user = ModelDef::new().has_many("addresses");
/// let address = ModelDef::new().belongs_to("user");
/// let post = ModelDef::new().belongs_to_model("author", "user");
/// # let _ = (user, address, post);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModelDef {
    pub(crate) associations: Vec<AssociationDef>,
}

#[derive(Debug, Clone)]
pub(crate) struct AssociationDef {
    pub(crate) name: String,
    pub(crate) kind: AssociationDefKind,
    /// Target model name, when it differs from the one implied by `name`.
    pub(crate) target: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AssociationDefKind {
    BelongsTo,
    HasMany,
}

impl ModelDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The model holds a `<name>_id` foreign key to a `name` model.
    pub fn belongs_to(self, name: &str) -> Self {
        self.push(name, AssociationDefKind::BelongsTo, None)
    }

    /// Like [`ModelDef::belongs_to`], pointing at an explicitly named model.
    pub fn belongs_to_model(self, name: &str, target: &str) -> Self {
        self.push(name, AssociationDefKind::BelongsTo, Some(target))
    }

    /// Records of the singular of `name` hold a `<this model>_id` foreign key.
    pub fn has_many(self, name: &str) -> Self {
        self.push(name, AssociationDefKind::HasMany, None)
    }

    /// Like [`ModelDef::has_many`], pointing at an explicitly named model.
    pub fn has_many_model(self, name: &str, target: &str) -> Self {
        self.push(name, AssociationDefKind::HasMany, Some(target))
    }

    fn push(mut self, name: &str, kind: AssociationDefKind, target: Option<&str>) -> Self {
        self.associations.push(AssociationDef {
            name: name.to_string(),
            kind,
            target: target.map(String::from),
        });
        self
    }
}
