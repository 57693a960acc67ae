use crate::{err, query, Id, Model, ModelClass, Record, Result, Value};

/// The children side of a `has_many` association, e.g. `user.addresses`.
///
/// While the owner is unsaved its children live only in memory, with a
/// `null` foreign key. Saving the owner links and saves them.
#[derive(Debug, Clone)]
pub struct HasMany {
    owner: Model,
    index: usize,

    /// Child model name
    target: String,

    /// Attribute on each child holding the owner's id
    foreign_key: String,
}

impl HasMany {
    pub(crate) fn from_parts(owner: Model, index: usize) -> HasMany {
        let model = owner.app_model();
        let has_many = model.association(index).expect_has_many();

        HasMany {
            target: has_many.target.clone(),
            foreign_key: has_many.foreign_key.clone(),
            owner,
            index,
        }
    }

    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }

    /// Every child, in collection order, followed by unsaved children held
    /// in memory.
    pub fn all(&self) -> Result<Vec<Model>> {
        let pending = self.owner.pending_children(self.index);
        let Some(owner_id) = self.owner.saved_id() else {
            return Ok(pending);
        };

        let mut children = self
            .target_class()?
            .filter_by(query! { self.foreign_key.as_str() => owner_id })?;

        // Prefer the caller's handles over fresh copies of the same record
        for child in &mut children {
            if let Some(handle) = pending.iter().find(|handle| handle.is_same_record(child)) {
                *child = handle.clone();
            }
        }
        children.extend(pending.into_iter().filter(|child| !child.is_saved()));

        Ok(children)
    }

    /// Ids of [`HasMany::all`], positionally. Unsaved children are `None`.
    pub fn ids(&self) -> Result<Vec<Option<Id>>> {
        Ok(self.all()?.iter().map(Model::id).collect())
    }

    /// Replaces the children.
    ///
    /// Children that drop out get a `null` foreign key (saved ones are
    /// written back). With a saved owner the new children are linked and
    /// saved immediately; otherwise they are held until the owner saves.
    pub fn set(&self, children: &[Model]) -> Result<()> {
        for child in children {
            if child.model_name() != self.target {
                return Err(err!(
                    "cannot add a `{}` to `{}` children; expected `{}`",
                    child.model_name(),
                    self.foreign_key,
                    self.target
                ));
            }
        }

        let current = self.all()?;
        for dropped in &current {
            if children.iter().any(|child| child.is_same_record(dropped)) {
                continue;
            }
            dropped.write_foreign_key(&self.foreign_key, Value::Null);
            if dropped.is_saved() {
                dropped.save()?;
            }
        }

        match self.owner.saved_id() {
            Some(owner_id) => {
                for child in children {
                    // Already linked in the store; local edits stay local
                    let linked = child.is_saved()
                        && current.iter().any(|current| current.is_same_record(child));

                    child.write_foreign_key(&self.foreign_key, owner_id);
                    if !linked {
                        child.save()?;
                    }
                }
                self.owner.set_pending_children(self.index, vec![]);
            }
            None => {
                for child in children {
                    child.write_foreign_key(&self.foreign_key, Value::Null);
                }
                self.owner.set_pending_children(self.index, children.to_vec());
            }
        }
        Ok(())
    }

    /// Replaces the children with the records that have the given ids.
    /// Ids with no record are skipped; `None` clears.
    pub fn set_ids(&self, ids: Option<&[Id]>) -> Result<()> {
        let children = match ids {
            Some(ids) => self.target_class()?.find_many(ids)?,
            None => vec![],
        };
        self.set(&children)
    }

    pub fn clear(&self) -> Result<()> {
        self.set(&[])
    }

    /// Builds an unsaved child and holds it in memory.
    pub fn new(&self, attrs: Record) -> Result<Model> {
        let child = self.target_class()?.new(attrs)?;
        child.write_foreign_key(&self.foreign_key, self.owner.saved_id());
        self.owner.push_pending_child(self.index, child.clone());
        Ok(child)
    }

    /// Creates a saved child.
    pub fn create(&self, attrs: Record) -> Result<Model> {
        let child = self.target_class()?.new(attrs)?;
        child.write_foreign_key(&self.foreign_key, self.owner.saved_id());
        child.save()?;

        if !self.owner.is_saved() {
            self.owner.push_pending_child(self.index, child.clone());
        }
        Ok(child)
    }

    fn target_class(&self) -> Result<ModelClass> {
        self.owner.target_class(self.index)
    }
}
