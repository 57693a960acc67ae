use crate::{err, record, Id, Model, ModelClass, Record, Result};

/// The parent side of a `belongs_to` association, e.g. `address.user`.
#[derive(Debug, Clone)]
pub struct BelongsTo {
    owner: Model,
    index: usize,

    /// Parent model name
    target: String,

    /// Attribute on the owner holding the parent's id
    foreign_key: String,
}

impl BelongsTo {
    pub(crate) fn from_parts(owner: Model, index: usize) -> BelongsTo {
        let model = owner.app_model();
        let belongs_to = model.association(index).expect_belongs_to();

        BelongsTo {
            target: belongs_to.target.clone(),
            foreign_key: belongs_to.foreign_key.clone(),
            owner,
            index,
        }
    }

    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    /// The parent: the one assigned in memory if any, else the record the
    /// foreign key points at. A destroyed in-memory parent reads as `None`.
    pub fn get(&self) -> Result<Option<Model>> {
        if let Some(parent) = self.owner.parent(self.index) {
            if parent.is_destroyed() {
                return Ok(None);
            }
            return Ok(Some(parent));
        }

        match self.id()? {
            Some(id) => self.target_class()?.find(id),
            None => Ok(None),
        }
    }

    /// The foreign key value.
    pub fn id(&self) -> Result<Option<Id>> {
        self.owner.attr(&self.foreign_key).to_option_id()
    }

    /// Assigns the parent in memory.
    ///
    /// The foreign key follows the parent: its id once saved, `null` until
    /// then. Passing `None` clears both.
    pub fn set(&self, parent: Option<&Model>) -> Result<()> {
        let Some(parent) = parent else {
            self.set_id(None);
            return Ok(());
        };

        if parent.model_name() != self.target {
            return Err(err!(
                "cannot assign a `{}` to `{}`; expected `{}`",
                parent.model_name(),
                self.foreign_key,
                self.target
            ));
        }

        self.owner.set_parent(self.index, parent.clone());
        self.owner.write_attr(&self.foreign_key, parent.saved_id());
        Ok(())
    }

    /// Writes the foreign key, dropping any in-memory parent.
    pub fn set_id(&self, id: Option<Id>) {
        self.owner.write_foreign_key(&self.foreign_key, id);
    }

    /// Builds an unsaved parent and assigns it.
    pub fn new(&self, attrs: Record) -> Result<Model> {
        let parent = self.target_class()?.new(attrs)?;
        self.set(Some(&parent))?;
        Ok(parent)
    }

    /// Creates a saved parent and assigns it.
    ///
    /// When the owner is already saved, only its foreign key is written to
    /// the store; other unsaved edits on the owner stay local.
    pub fn create(&self, attrs: Record) -> Result<Model> {
        let parent = self.target_class()?.create(attrs)?;
        self.set(Some(&parent))?;

        if let Some(owner_id) = self.owner.saved_id() {
            let collection = self.owner.collection_name();
            let change = record! { self.foreign_key.as_str() => parent.id() };
            self.owner
                .schema()
                .with_db_mut(|db| db.collection_mut(&collection)?.update(owner_id, &change))?;
        }

        Ok(parent)
    }

    fn target_class(&self) -> Result<ModelClass> {
        self.owner.target_class(self.index)
    }
}
