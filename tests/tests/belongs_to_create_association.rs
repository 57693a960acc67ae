//! `create_<parent>` through a `belongs_to` association persists the parent
//! and links the child, whatever state the child was in.

use tests::prelude::*;

use pretty_assertions::assert_eq;

fn setup(json: &str) -> Schema {
    models!(fixtures(json),
        "user" => ModelDef::new(),
        "address" => ModelDef::new().belongs_to("user"),
    )
}

fn assert_linked(address: &Model, ganon: &Model, expect: Record) {
    assert!(ganon.is_saved(), "the parent was persisted");
    assert_eq!(assert_some!(assert_ok!(address.belongs_to("user")).get().unwrap()), *ganon);
    assert_eq!(address.attr("user_id"), Value::from(ganon.id()));
    assert_eq!(address.attrs(), expect);
}

fn saved_child_no_parent() {
    let schema = setup(r#"{"users": [], "addresses": [{"id": 1, "name": "foo"}]}"#);
    let address = assert_some!(schema.model("address").unwrap().find(1).unwrap());

    let ganon = address.invoke("createUser", record! { "name" => "Ganon" }).unwrap();

    assert_linked(
        &address,
        &ganon,
        record! { "id" => 1, "name" => "foo", "user_id" => ganon.id() },
    );

    // Only the foreign key is written through to the store
    let stored = schema.with_db(|db| db.collection("addresses").unwrap().find(Id(1)));
    assert_eq!(
        assert_some!(stored),
        record! { "id" => 1, "name" => "foo", "user_id" => ganon.id() }
    );
}

fn saved_child_new_parent() {
    let schema = setup(r#"{"users": [], "addresses": [{"id": 1, "name": "foo"}]}"#);
    let address = assert_some!(schema.model("address").unwrap().find(1).unwrap());
    let newbie = schema.model("user").unwrap().new(record! { "name" => "Newbie" }).unwrap();
    address.belongs_to("user").unwrap().set(Some(&newbie)).unwrap();

    let ganon = address.invoke("createUser", record! { "name" => "Ganon" }).unwrap();

    assert_linked(
        &address,
        &ganon,
        record! { "id" => 1, "name" => "foo", "user_id" => ganon.id() },
    );
    assert!(newbie.is_new());
}

fn saved_child_saved_parent() {
    let schema = setup(
        r#"{"users": [{"id": 1, "name": "some user"}], "addresses": [{"id": 1, "name": "foo"}]}"#,
    );
    let address = assert_some!(schema.model("address").unwrap().find(1).unwrap());

    let ganon = address.invoke("createUser", record! { "name" => "Ganon" }).unwrap();

    assert_eq!(ganon.id(), Some(Id(2)));
    assert_linked(
        &address,
        &ganon,
        record! { "id" => 1, "name" => "foo", "user_id" => 2 },
    );
}

fn new_child_no_parent() {
    let schema = setup(r#"{"users": [], "addresses": []}"#);
    let address = schema.model("address").unwrap().new(record! { "name" => "New addr" }).unwrap();

    let ganon = address.invoke("createUser", record! { "name" => "Ganon" }).unwrap();

    assert_linked(
        &address,
        &ganon,
        record! { "name" => "New addr", "user_id" => ganon.id() },
    );
    assert!(address.is_new());
    assert_empty!(schema.model("address").unwrap().all().unwrap());
}

fn new_child_new_parent() {
    let schema = setup(r#"{"users": [], "addresses": []}"#);
    let address = schema.model("address").unwrap().new(record! { "name" => "New addr" }).unwrap();
    let newbie = schema.model("user").unwrap().new(record! { "name" => "Newbie" }).unwrap();
    address.belongs_to("user").unwrap().set(Some(&newbie)).unwrap();

    let ganon = address.invoke("createUser", record! { "name" => "Ganon" }).unwrap();

    assert_linked(
        &address,
        &ganon,
        record! { "name" => "New addr", "user_id" => ganon.id() },
    );
}

fn new_child_saved_parent() {
    let schema = setup(r#"{"users": [{"id": 1, "name": "some user"}], "addresses": []}"#);
    let address = schema.model("address").unwrap().new(record! { "name" => "New addr" }).unwrap();
    let user = assert_some!(schema.model("user").unwrap().find(1).unwrap());
    address.belongs_to("user").unwrap().set(Some(&user)).unwrap();
    assert_eq!(address.attr("user_id"), Value::from(1));

    let ganon = address.belongs_to("user").unwrap().create(record! { "name" => "Ganon" }).unwrap();

    assert_linked(
        &address,
        &ganon,
        record! { "name" => "New addr", "user_id" => ganon.id() },
    );

    // Saving the child persists the new link
    address.save().unwrap();
    let stored = schema.with_db(|db| db.collection("addresses").unwrap().first());
    assert_eq!(assert_some!(stored).get("user_id"), Some(&Value::from(ganon.id())));
}

tests!(
    saved_child_no_parent,
    saved_child_new_parent,
    saved_child_saved_parent,
    new_child_no_parent,
    new_child_new_parent,
    new_child_saved_parent,
);
