use crate::relation::{BelongsTo, HasMany};
use crate::schema::app::{self, Accessor, AssociationKind};
use crate::{err, Error, Id, ModelClass, Record, Result, Schema, Value};

use tracing::debug;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// A handle to one record of a registered model type.
///
/// Handles are cheap to clone and clones observe the same state. A handle
/// carries its own copy of the attributes; it is only written back to the
/// store by [`Model::save`] and only refreshed by [`Model::reload`].
#[derive(Clone)]
pub struct Model {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    schema: Schema,
    model: Rc<app::Model>,
    attrs: Record,

    /// True once the record exists in the store
    persisted: bool,

    destroyed: bool,

    /// In-memory `belongs_to` targets, keyed by association index
    parents: BTreeMap<usize, Model>,

    /// In-memory `has_many` children not yet linked through the store, keyed
    /// by association index
    children: BTreeMap<usize, Vec<Model>>,

    /// The owner listing this model among its in-memory children, if any
    held_by: Option<Holder>,
}

/// Released as soon as the model's foreign key is written by anything else.
struct Holder {
    owner: Weak<RefCell<Inner>>,
    index: usize,
    foreign_key: String,
}

impl Model {
    pub(crate) fn new_unsaved(schema: Schema, model: Rc<app::Model>, attrs: Record) -> Result<Model> {
        let this = Model::wrap(schema, model, Record::new(), false);
        for (key, value) in attrs.iter() {
            this.set(key, value.clone())?;
        }
        Ok(this)
    }

    pub(crate) fn from_record(schema: Schema, model: Rc<app::Model>, record: Record) -> Model {
        Model::wrap(schema, model, record, true)
    }

    fn wrap(schema: Schema, model: Rc<app::Model>, mut attrs: Record, persisted: bool) -> Model {
        with_foreign_key_defaults(&model, &mut attrs);

        Model {
            inner: Rc::new(RefCell::new(Inner {
                schema,
                model,
                attrs,
                persisted,
                destroyed: false,
                parents: BTreeMap::new(),
                children: BTreeMap::new(),
                held_by: None,
            })),
        }
    }

    pub fn id(&self) -> Option<Id> {
        self.inner.borrow().attrs.id()
    }

    /// True until the model is first saved.
    pub fn is_new(&self) -> bool {
        !self.inner.borrow().persisted
    }

    pub fn is_saved(&self) -> bool {
        let inner = self.inner.borrow();
        inner.persisted && !inner.destroyed
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    pub fn model_name(&self) -> String {
        self.inner.borrow().model.name.snake_case()
    }

    pub fn schema(&self) -> Schema {
        self.inner.borrow().schema.clone()
    }

    /// Reads a stored attribute, `Null` if absent.
    ///
    /// A `belongs_to` foreign key reflects the in-memory parent when one is
    /// assigned: its id once saved, `Null` before.
    pub fn attr(&self, key: &str) -> Value {
        let inner = self.inner.borrow();
        for (index, belongs_to) in inner.model.belongs_tos() {
            if belongs_to.foreign_key == key {
                if let Some(parent) = inner.parents.get(&index) {
                    return parent.saved_id().into();
                }
            }
        }
        inner.attrs.get_or_null(key).clone()
    }

    /// Snapshot of every attribute, foreign keys included.
    pub fn attrs(&self) -> Record {
        let inner = self.inner.borrow();
        let mut attrs = inner.attrs.clone();
        for (index, parent) in &inner.parents {
            let foreign_key = &inner.model.association(*index).expect_belongs_to().foreign_key;
            attrs.insert(foreign_key.as_str(), parent.saved_id());
        }
        attrs
    }

    /// Reads an attribute or a synthesized `<singular>_ids` list.
    pub fn get(&self, key: &str) -> Result<Value> {
        let model = self.app_model();
        match model.accessor(key) {
            None | Some(Accessor::ForeignKey(_)) => Ok(self.attr(key)),
            Some(Accessor::Ids(index)) => {
                let ids = HasMany::from_parts(self.clone(), index).ids()?;
                Ok(Value::List(ids.into_iter().map(Value::from).collect()))
            }
            Some(_) => Err(err!(
                "`{key}` on `{}` is not an attribute; use `belongs_to`, `has_many` or `invoke`",
                model.name
            )),
        }
    }

    /// Writes an attribute.
    ///
    /// Foreign keys and `<singular>_ids` lists are routed through their
    /// association. Changing the id of a saved model fails.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let model = self.app_model();

        match model.accessor(key) {
            Some(Accessor::ForeignKey(index)) => {
                BelongsTo::from_parts(self.clone(), index).set_id(value.to_option_id()?);
                Ok(())
            }
            Some(Accessor::Ids(index)) => {
                let has_many = HasMany::from_parts(self.clone(), index);
                match value {
                    Value::Null => has_many.set_ids(None),
                    Value::List(items) => {
                        let ids = items.iter().map(Id::try_from).collect::<Result<Vec<_>>>()?;
                        has_many.set_ids(Some(&ids))
                    }
                    value => Err(Error::type_conversion(value, "List")),
                }
            }
            Some(_) => Err(err!(
                "`{key}` on `{}` is not an attribute; use `belongs_to` or `has_many`",
                model.name
            )),
            None if key == "id" => self.set_id(value),
            None => {
                self.write_attr(key, value);
                Ok(())
            }
        }
    }

    fn set_id(&self, value: Value) -> Result<()> {
        let id = value.to_option_id()?;
        let mut inner = self.inner.borrow_mut();

        if inner.persisted {
            return match inner.attrs.id() {
                Some(current) if id != Some(current) => Err(Error::invalid_identifier_mutation(
                    inner.model.name.snake_case(),
                    current,
                )),
                _ => Ok(()),
            };
        }

        match id {
            Some(id) => inner.attrs.set_id(id),
            None => {
                inner.attrs.remove("id");
            }
        }
        Ok(())
    }

    /// Writes the model to the store.
    ///
    /// A new model is inserted and receives its id; a saved one is updated
    /// in place. Children held in memory by `has_many` associations are
    /// then linked and saved.
    pub fn save(&self) -> Result<Model> {
        if self.is_destroyed() {
            return Err(Error::record_not_found(self.describe()).context(err!("cannot save")));
        }

        let attrs = self.attrs();
        let (collection, existing) = {
            let inner = self.inner.borrow();
            let existing = inner.attrs.id().filter(|_| inner.persisted);
            (inner.model.collection.clone(), existing)
        };

        let stored = self.schema().with_db_mut(|db| {
            let collection = db.collection_mut(&collection)?;
            match existing {
                Some(id) => collection.update(id, &attrs),
                None => collection.insert(attrs),
            }
        })?;

        {
            let mut inner = self.inner.borrow_mut();
            debug!(model = %inner.model.name, id = ?stored.id(), "save model");
            inner.attrs = stored;
            inner.persisted = true;
        }

        self.save_children()?;
        Ok(self.clone())
    }

    fn save_children(&self) -> Result<()> {
        let Some(id) = self.saved_id() else {
            return Ok(());
        };

        let model = self.app_model();
        let indices: Vec<usize> = self.inner.borrow().children.keys().copied().collect();

        for index in indices {
            let foreign_key = &model.association(index).expect_has_many().foreign_key;
            let children = self.pending_children(index);

            for (saved, child) in children.iter().enumerate() {
                child.write_foreign_key(foreign_key, id);
                if let Err(err) = child.save() {
                    self.set_pending_children(index, children[saved..].to_vec());
                    return Err(err);
                }
            }
            self.set_pending_children(index, vec![]);
        }
        Ok(())
    }

    /// Sets each attribute, then saves.
    pub fn update(&self, attrs: Record) -> Result<Model> {
        for (key, value) in attrs.iter() {
            self.set(key, value.clone())?;
        }
        self.save()
    }

    /// Removes the backing record. The handle's attributes stay readable.
    pub fn destroy(&self) -> Result<()> {
        if self.is_destroyed() {
            return Ok(());
        }

        if let Some(id) = self.saved_id() {
            let collection = self.collection_name();
            self.schema()
                .with_db_mut(|db| db.collection_mut(&collection)?.remove(id))?;
            debug!(model = %self.model_name(), %id, "destroy model");
        }

        self.inner.borrow_mut().destroyed = true;
        Ok(())
    }

    /// Re-reads the attributes from the store, discarding local edits and
    /// in-memory association state.
    pub fn reload(&self) -> Result<()> {
        let not_found = || Error::record_not_found(self.describe()).context(err!("cannot reload"));

        let id = self.saved_id().ok_or_else(not_found)?;
        let collection = self.collection_name();
        let record = self
            .schema()
            .with_db(|db| db.collection(&collection).map(|collection| collection.find(id)))?
            .ok_or_else(not_found)?;

        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        inner.attrs = record;
        with_foreign_key_defaults(&inner.model, &mut inner.attrs);
        inner.parents.clear();
        inner.children.clear();
        Ok(())
    }

    /// Calls a synthesized `new<Name>` / `create<Name>` method by name.
    pub fn invoke(&self, method: &str, attrs: Record) -> Result<Model> {
        let model = self.app_model();
        let (index, create) = match model.accessor(method) {
            Some(Accessor::New(index)) => (index, false),
            Some(Accessor::Create(index)) => (index, true),
            _ => return Err(Error::unknown_association(model.name.snake_case(), method)),
        };

        match (&model.association(index).kind, create) {
            (AssociationKind::BelongsTo(_), false) => {
                BelongsTo::from_parts(self.clone(), index).new(attrs)
            }
            (AssociationKind::BelongsTo(_), true) => {
                BelongsTo::from_parts(self.clone(), index).create(attrs)
            }
            (AssociationKind::HasMany(_), false) => HasMany::from_parts(self.clone(), index).new(attrs),
            (AssociationKind::HasMany(_), true) => {
                HasMany::from_parts(self.clone(), index).create(attrs)
            }
        }
    }

    pub fn belongs_to(&self, name: &str) -> Result<BelongsTo> {
        let model = self.app_model();
        match model.association_by_name(name) {
            Some((index, assoc)) if matches!(assoc.kind, AssociationKind::BelongsTo(_)) => {
                Ok(BelongsTo::from_parts(self.clone(), index))
            }
            _ => Err(Error::unknown_association(model.name.snake_case(), name)),
        }
    }

    pub fn has_many(&self, name: &str) -> Result<HasMany> {
        let model = self.app_model();
        match model.association_by_name(name) {
            Some((index, assoc)) if matches!(assoc.kind, AssociationKind::HasMany(_)) => {
                Ok(HasMany::from_parts(self.clone(), index))
            }
            _ => Err(Error::unknown_association(model.name.snake_case(), name)),
        }
    }

    pub(crate) fn app_model(&self) -> Rc<app::Model> {
        self.inner.borrow().model.clone()
    }

    pub(crate) fn collection_name(&self) -> String {
        self.inner.borrow().model.collection.clone()
    }

    /// The id, if the record currently exists in the store.
    pub(crate) fn saved_id(&self) -> Option<Id> {
        if self.is_saved() {
            self.id()
        } else {
            None
        }
    }

    /// Factory for the model targeted by association `index`.
    pub(crate) fn target_class(&self, index: usize) -> Result<ModelClass> {
        let model = self.app_model();
        self.schema().model(model.association(index).target())
    }

    /// True if both handles stand for the same record.
    pub fn is_same_record(&self, other: &Model) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match (self.saved_id(), other.saved_id()) {
            (Some(lhs), Some(rhs)) => lhs == rhs && self.model_name() == other.model_name(),
            _ => false,
        }
    }

    pub(crate) fn write_attr(&self, key: &str, value: impl Into<Value>) {
        let mut inner = self.inner.borrow_mut();
        inner.release_foreign_key(key);
        inner.attrs.insert(key, value);
    }

    /// Writes a foreign key directly, dropping any in-memory parent it was
    /// derived from.
    pub(crate) fn write_foreign_key(&self, key: &str, value: impl Into<Value>) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        for (index, belongs_to) in inner.model.belongs_tos() {
            if belongs_to.foreign_key == key {
                inner.parents.remove(&index);
            }
        }
        inner.release_foreign_key(key);
        inner.attrs.insert(key, value);
    }

    pub(crate) fn parent(&self, index: usize) -> Option<Model> {
        self.inner.borrow().parents.get(&index).cloned()
    }

    pub(crate) fn set_parent(&self, index: usize, parent: Model) {
        self.inner.borrow_mut().parents.insert(index, parent);
    }

    /// Children held in memory for association `index`. Children since
    /// claimed by another owner, or whose foreign key was rewritten, are
    /// dropped.
    pub(crate) fn pending_children(&self, index: usize) -> Vec<Model> {
        let mut inner = self.inner.borrow_mut();
        let Some(children) = inner.children.get_mut(&index) else {
            return vec![];
        };
        children.retain(|child| child.is_held_by(self, index));
        children.clone()
    }

    pub(crate) fn set_pending_children(&self, index: usize, children: Vec<Model>) {
        for child in &children {
            child.hold_for(self, index);
        }
        let mut inner = self.inner.borrow_mut();
        if children.is_empty() {
            inner.children.remove(&index);
        } else {
            inner.children.insert(index, children);
        }
    }

    pub(crate) fn push_pending_child(&self, index: usize, child: Model) {
        child.hold_for(self, index);
        self.inner
            .borrow_mut()
            .children
            .entry(index)
            .or_default()
            .push(child);
    }

    fn hold_for(&self, owner: &Model, index: usize) {
        let foreign_key = owner
            .app_model()
            .association(index)
            .expect_has_many()
            .foreign_key
            .clone();

        self.inner.borrow_mut().held_by = Some(Holder {
            owner: Rc::downgrade(&owner.inner),
            index,
            foreign_key,
        });
    }

    fn is_held_by(&self, owner: &Model, index: usize) -> bool {
        match &self.inner.borrow().held_by {
            Some(holder) => {
                holder.index == index && std::ptr::eq(holder.owner.as_ptr(), Rc::as_ptr(&owner.inner))
            }
            None => false,
        }
    }

    fn describe(&self) -> String {
        match self.id() {
            Some(id) => format!("model={} id={id}", self.model_name()),
            None => format!("model={} id=none", self.model_name()),
        }
    }
}

impl Inner {
    fn release_foreign_key(&mut self, key: &str) {
        if self.held_by.as_ref().is_some_and(|holder| holder.foreign_key == key) {
            self.held_by = None;
        }
    }
}

/// Every `belongs_to` foreign key is present, `Null` when unset.
fn with_foreign_key_defaults(model: &app::Model, attrs: &mut Record) {
    for (_, belongs_to) in model.belongs_tos() {
        if !attrs.contains_key(&belongs_to.foreign_key) {
            attrs.insert(belongs_to.foreign_key.as_str(), Value::Null);
        }
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Model) -> bool {
        self.model_name() == other.model_name() && self.attrs() == other.attrs()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Model")
            .field("name", &self.model_name())
            .field("attrs", &self.attrs())
            .field("saved", &self.is_saved())
            .finish()
    }
}
