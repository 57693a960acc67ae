//! A saved parent holding one unsaved child built through `new_<child>`.

use tests::prelude::*;

use pretty_assertions::assert_eq;

struct Fixture {
    schema: Schema,
    parent: Model,
    new_child: Model,
}

fn setup() -> Fixture {
    let schema = models!(
        fixtures(
            r#"{
                "users": [{"id": 1, "name": "Link"}],
                "addresses": [
                    {"id": 1, "name": "123 Hyrule Way"},
                    {"id": 2, "name": "12 Goron City"}
                ]
            }"#,
        ),
        "user" => ModelDef::new().has_many("addresses"),
        "address" => ModelDef::new(),
    );

    let parent = assert_some!(schema.model("user").unwrap().find(1).unwrap());
    let new_child = parent.invoke("newAddress", record! { "name" => "newAddr" }).unwrap();

    Fixture {
        schema,
        parent,
        new_child,
    }
}

fn address(schema: &Schema, id: i64) -> Model {
    assert_some!(schema.model("address").unwrap().find(id).unwrap())
}

fn ids(parent: &Model) -> Vec<Option<Id>> {
    parent.has_many("addresses").unwrap().ids().unwrap()
}

fn children(parent: &Model) -> Vec<Model> {
    parent.has_many("addresses").unwrap().all().unwrap()
}

fn parent_creates_saved_child() {
    let Fixture { parent, new_child, .. } = setup();

    let springfield = parent
        .invoke("createAddress", record! { "name" => "1 Springfield ave" })
        .unwrap();

    assert!(springfield.is_saved(), "the child was persisted");
    assert_eq!(springfield.attr("name"), Value::from("1 Springfield ave"));
    assert_eq!(springfield.attr("user_id"), Value::from(1));

    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[0], springfield);
    assert_eq!(children[1], new_child);
    assert_eq!(ids(&parent), vec![springfield.id(), None]);
}

fn parent_creates_unsaved_child() {
    let Fixture { parent, .. } = setup();

    let hudson = parent.invoke("newAddress", record! { "name" => "2 Hudson st" }).unwrap();

    assert_none!(hudson.id());
    assert_eq!(hudson.attr("name"), Value::from("2 Hudson st"));
    assert_eq!(hudson.attr("user_id"), Value::from(1));

    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[1], hudson);
    assert_eq!(ids(&parent), vec![None, None]);
}

fn parent_references_children() {
    let Fixture { parent, new_child, .. } = setup();

    let children = children(&parent);
    assert_len!(children, 1);
    assert_eq!(children[0], new_child);
    assert_eq!(ids(&parent), vec![None]);
    assert_eq!(assert_ok!(parent.get("address_ids")), Value::List(vec![Value::Null]));
}

fn update_saved_children_via_ids() {
    let Fixture { schema, parent, .. } = setup();
    let child1 = address(&schema, 1);
    let child2 = address(&schema, 2);

    parent.set("address_ids", vec![1, 2]).unwrap();
    child1.reload().unwrap();
    child2.reload().unwrap();

    assert_eq!(ids(&parent), vec![Some(Id(1)), Some(Id(2))]);
    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[0], child1);
    assert_eq!(children[1], child2);
}

fn update_saved_children_via_children() {
    let Fixture { schema, parent, .. } = setup();
    let child1 = address(&schema, 1);
    let child2 = address(&schema, 2);

    parent
        .has_many("addresses")
        .unwrap()
        .set(&[child1.clone(), child2.clone()])
        .unwrap();
    child1.reload().unwrap();
    child2.reload().unwrap();

    assert_eq!(ids(&parent), vec![Some(Id(1)), Some(Id(2))]);
    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[0], child1);
    assert_eq!(children[1], child2);
}

fn update_new_children_via_children() {
    let Fixture { schema, parent, .. } = setup();
    let addresses = schema.model("address").unwrap();
    let child1 = addresses.new(record! { "name" => "1a" }).unwrap();
    let child2 = addresses.new(record! { "name" => "2b" }).unwrap();

    parent
        .has_many("addresses")
        .unwrap()
        .set(&[child1.clone(), child2.clone()])
        .unwrap();
    child1.reload().unwrap();
    child2.reload().unwrap();

    assert!(child1.is_saved(), "the new child was saved");
    assert_eq!(ids(&parent), vec![child1.id(), child2.id()]);
    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[0], child1);
    assert_eq!(children[1], child2);
}

fn update_mixed_children_via_children() {
    let Fixture { schema, parent, .. } = setup();
    let saved = address(&schema, 1);
    let unsaved = schema.model("address").unwrap().new(record! { "name" => "abc" }).unwrap();

    parent
        .has_many("addresses")
        .unwrap()
        .set(&[saved.clone(), unsaved.clone()])
        .unwrap();
    saved.reload().unwrap();
    unsaved.reload().unwrap();

    assert!(unsaved.is_saved(), "the new child was saved");
    assert_eq!(ids(&parent), vec![saved.id(), unsaved.id()]);
    let children = children(&parent);
    assert_len!(children, 2);
    assert_eq!(children[0], saved);
    assert_eq!(children[1], unsaved);
}

fn clear_via_children() {
    let Fixture { parent, new_child, .. } = setup();

    parent.has_many("addresses").unwrap().clear().unwrap();

    assert_empty!(ids(&parent));
    assert_empty!(children(&parent));
    assert_eq!(new_child.attr("user_id"), Value::Null);
}

fn clear_via_null_ids() {
    let Fixture { parent, .. } = setup();

    parent.set("address_ids", Value::Null).unwrap();

    assert_empty!(ids(&parent));
    assert_empty!(children(&parent));
}

fn clear_via_empty_ids() {
    let Fixture { parent, .. } = setup();

    parent.set("address_ids", Value::List(vec![])).unwrap();

    assert_empty!(ids(&parent));
    assert_empty!(children(&parent));
}

fn replacement_unlinks_previous_children() {
    let Fixture { schema, parent, .. } = setup();
    parent.set("address_ids", vec![1, 2]).unwrap();

    parent.set("address_ids", vec![2]).unwrap();

    assert_eq!(ids(&parent), vec![Some(Id(2))]);
    assert_eq!(address(&schema, 1).attr("user_id"), Value::Null);
    assert_eq!(address(&schema, 2).attr("user_id"), Value::from(1));
}

tests!(
    parent_creates_saved_child,
    parent_creates_unsaved_child,
    parent_references_children,
    update_saved_children_via_ids,
    update_saved_children_via_children,
    update_new_children_via_children,
    update_mixed_children_via_children,
    clear_via_children,
    clear_via_null_ids,
    clear_via_empty_ids,
    replacement_unlinks_previous_children,
);
