//! Unsaved children held in memory follow their own foreign key.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn setup() -> Schema {
    users_and_addresses(Db::new())
}

/// Clearing the child's parent drops it from the parent's children.
fn cleared_child_is_dropped() {
    let schema = setup();
    let users = schema.model("user").unwrap();

    for parent in [users.new(record! {}).unwrap(), users.create(record! {}).unwrap()] {
        let addresses = parent.has_many("addresses").unwrap();
        let child = addresses.new(record! { "name" => "Kakariko" }).unwrap();
        assert_len!(addresses.all().unwrap(), 1);

        child.belongs_to("user").unwrap().set(None).unwrap();
        assert_empty!(addresses.all().unwrap());

        parent.save().unwrap();
        assert!(child.is_new());
        assert_eq!(child.attr("user_id"), Value::Null);
    }
}

/// A child handed to another unsaved parent is no longer listed, or
/// linked, by the first.
fn moved_child_stays_moved() {
    let schema = setup();
    let users = schema.model("user").unwrap();
    let first = users.new(record! {}).unwrap();
    let second = users.new(record! {}).unwrap();

    let stays = first.has_many("addresses").unwrap().new(record! {}).unwrap();
    let moves = first.has_many("addresses").unwrap().new(record! {}).unwrap();
    second.has_many("addresses").unwrap().set(&[moves.clone()]).unwrap();

    let listed = first.has_many("addresses").unwrap().all().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_same_record(&stays));

    first.save().unwrap();
    assert_eq!(stays.attr("user_id"), Value::from(first.id()));
    assert_eq!(moves.attr("user_id"), Value::Null);

    second.save().unwrap();
    assert_eq!(moves.attr("user_id"), Value::from(second.id()));
    assert_eq!(first.has_many("addresses").unwrap().ids().unwrap(), vec![stays.id()]);
    assert_eq!(second.has_many("addresses").unwrap().ids().unwrap(), vec![moves.id()]);
}

/// Reassigning a child to a different parent through its own key moves
/// it out of the first parent's in-memory list.
fn reassigned_child_is_dropped() {
    let schema = setup();
    let users = schema.model("user").unwrap();
    let first = users.create(record! {}).unwrap();
    let second = users.create(record! {}).unwrap();

    let child = first.has_many("addresses").unwrap().new(record! {}).unwrap();
    child.belongs_to("user").unwrap().set(Some(&second)).unwrap();

    assert_empty!(first.has_many("addresses").unwrap().all().unwrap());

    child.save().unwrap();
    assert_empty!(first.has_many("addresses").unwrap().all().unwrap());
    assert_eq!(second.has_many("addresses").unwrap().ids().unwrap(), vec![child.id()]);
}

tests!(
    cleared_child_is_dropped,
    moved_child_stays_moved,
    reassigned_child_is_dropped,
);
