//! Association invariants that hold across every scenario.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn setup() -> Schema {
    users_and_addresses(Db::new())
}

/// `new(attrs).save()` keeps every attribute and adds an integer id.
fn save_round_trip() {
    let schema = setup();
    let attrs = record! { "name" => "Link", "age" => 17, "hero" => true, "rupees" => 99.5 };

    let user = schema.model("user").unwrap().new(attrs.clone()).unwrap().save().unwrap();

    let mut expect = attrs;
    expect.set_id(assert_some!(user.id()));
    assert_eq!(user.attrs(), expect);

    let stored = assert_some!(schema.model("user").unwrap().find(assert_some!(user.id())).unwrap());
    assert_eq!(stored, user);
}

/// A saved child pointing at a saved parent shows up in the parent's
/// `has_many`, and a freshly found child points back.
fn belongs_to_symmetry() {
    let schema = setup();
    let parent = schema.model("user").unwrap().create(record! {}).unwrap();
    let child = schema.model("address").unwrap().new(record! {}).unwrap();

    child.belongs_to("user").unwrap().set(Some(&parent)).unwrap();
    child.save().unwrap();

    assert_eq!(child.attr("user_id"), Value::from(parent.id()));
    let children = parent.has_many("addresses").unwrap().all().unwrap();
    assert_eq!(children, vec![child.clone()]);

    let found = assert_some!(schema.model("address").unwrap().find(assert_some!(child.id())).unwrap());
    let found_parent = assert_some!(found.belongs_to("user").unwrap().get().unwrap());
    assert_eq!(found_parent.id(), parent.id());
}

/// After `set`, exactly the given children point at the parent.
fn has_many_replacement_is_total() {
    let schema = setup();
    let parent = schema.model("user").unwrap().create(record! {}).unwrap();
    let addresses = schema.model("address").unwrap();
    let a = addresses.create(record! { "user_id" => parent.id() }).unwrap();
    let b = addresses.create(record! { "user_id" => parent.id() }).unwrap();
    let c = addresses.create(record! {}).unwrap();

    parent.has_many("addresses").unwrap().set(&[b.clone(), c.clone()]).unwrap();

    let linked = addresses.filter_by(query! { "user_id" => parent.id() }).unwrap();
    assert_eq!(linked.iter().map(Model::id).collect::<Vec<_>>(), vec![b.id(), c.id()]);

    a.reload().unwrap();
    assert_eq!(a.attr("user_id"), Value::Null);
}

/// Children of an unsaved parent are linked when the parent saves.
fn unsaved_parent_deferral() {
    let schema = setup();
    let parent = schema.model("user").unwrap().new(record! {}).unwrap();
    let children = [
        schema.model("address").unwrap().create(record! {}).unwrap(),
        schema.model("address").unwrap().new(record! {}).unwrap(),
    ];

    parent.has_many("addresses").unwrap().set(&children).unwrap();
    for child in &children {
        assert_eq!(child.attr("user_id"), Value::Null);
    }

    parent.save().unwrap();

    for child in &children {
        assert!(child.is_saved());
        assert_eq!(child.attr("user_id"), Value::from(parent.id()));
    }
    let ids = parent.has_many("addresses").unwrap().ids().unwrap();
    assert_eq!(ids, children.iter().map(Model::id).collect::<Vec<_>>());
}

/// Clearing by `None` or `[]` leaves no children.
fn clearing() {
    let schema = setup();
    let parent = schema.model("user").unwrap().create(record! {}).unwrap();
    let addresses = parent.has_many("addresses").unwrap();

    for clear in [Value::Null, Value::List(vec![])] {
        addresses.create(record! {}).unwrap();
        addresses.new(record! {}).unwrap();
        assert_len!(addresses.all().unwrap(), 2);

        parent.set("address_ids", clear).unwrap();

        assert_empty!(addresses.all().unwrap());
        assert_empty!(addresses.ids().unwrap());
    }
}

/// Ids are assigned `1..=n` in insertion order.
fn id_monotonicity() {
    let schema = setup();
    let users = schema.model("user").unwrap();

    for expect in 1..=5 {
        let user = users.create(record! {}).unwrap();
        assert_eq!(user.id(), Some(Id(expect)));
    }
}

tests!(
    save_round_trip,
    belongs_to_symmetry,
    has_many_replacement_is_total,
    unsaved_parent_deferral,
    clearing,
    id_monotonicity,
);
