use serde::Serialize;
use typed_collections::{
    call_extension, register_extension, Collection, CollectionError, Dictionary, GenericList,
    Stack, TypeToken, Value,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Article {
    id: i64,
    title: String,
}

fn article(id: i64, title: &str) -> Value {
    Value::new(Article {
        id,
        title: title.to_string(),
    })
}

#[test]
fn test_dictionary_rejects_a_value_of_the_wrong_type() {
    let mut dictionary = Dictionary::of::<String, i64>();

    let result = dictionary.add(
        Value::new("x".to_string()),
        Value::new("not a number".to_string()),
    );

    match result {
        Err(CollectionError::InvalidArgument(message)) => {
            // The message names the expected value type.
            assert!(message.contains("i64"));
            assert!(message.contains("value type"));
        }
        other => panic!("expected InvalidArgument, got {:?}", other),
    }

    // The failed call left the dictionary untouched.
    assert_eq!(dictionary.count(), 0);
}

#[test]
fn test_dictionary_rejects_a_key_of_the_wrong_type() {
    let mut dictionary = Dictionary::of::<String, i64>();

    let result = dictionary.add(Value::new(1i64), Value::new(2i64));

    match result {
        Err(CollectionError::InvalidArgument(message)) => {
            assert!(message.contains("key type"));
        }
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_generic_list_remove_shifts_elements_down() {
    let mut articles = GenericList::with_values(
        TypeToken::of::<Article>(),
        vec![article(1, "a"), article(2, "b"), article(3, "c")],
    )
    .unwrap();

    let previously_second = articles.get(1).unwrap().clone();
    articles.remove(0).unwrap();

    assert_eq!(articles.count(), 2);
    assert_eq!(articles.get(0).unwrap(), &previously_second);
}

#[test]
fn test_generic_list_construction_validates_initial_values() {
    let result = GenericList::with_values(
        TypeToken::of::<Article>(),
        vec![article(1, "a"), Value::new("not an article".to_string())],
    );

    assert!(matches!(result, Err(CollectionError::InvalidArgument(_))));
}

#[test]
fn test_stack_push_validates_the_declared_type() {
    let mut stack = Stack::of::<String>();

    assert!(matches!(
        stack.push(Value::new(42i64)),
        Err(CollectionError::InvalidArgument(_))
    ));

    stack.push(Value::new("a".to_string())).unwrap();
    assert_eq!(stack.pop(), Some(Value::new("a".to_string())));
    assert!(stack.is_empty());
}

#[test]
fn test_typed_containers_share_the_base_contract() {
    let mut stack = Stack::of::<i64>();
    stack
        .fill(vec![Value::new(1i64), Value::new(2i64), Value::new(3i64)])
        .unwrap();

    assert_eq!(stack.count(), 3);
    assert_eq!(stack.first().unwrap(), &Value::new(1i64));
    assert_eq!(stack.last().unwrap(), &Value::new(3i64));
    assert!(stack.contains(&Value::new(2i64)));
    assert_eq!(stack.sum(|value| value.clone()).unwrap(), 6.0);

    stack.clear();
    assert!(stack.is_empty());
}

#[test]
fn test_dictionary_merge_demands_matching_descriptors() {
    let mut ages = Dictionary::of::<String, i64>();
    ages.add(Value::new("Max".to_string()), Value::new(24i64))
        .unwrap();

    let names = Dictionary::of::<String, String>();

    assert!(matches!(
        ages.merge(&names),
        Err(CollectionError::InvalidArgument(_))
    ));
}

#[test]
fn test_generic_list_diff_against_the_same_declared_type() {
    let all = GenericList::with_values(
        TypeToken::of::<Article>(),
        vec![article(1, "a"), article(2, "b")],
    )
    .unwrap();
    let some = GenericList::with_values(TypeToken::of::<Article>(), vec![article(1, "a")]).unwrap();

    let diff = all.diff(&some).unwrap();

    assert_eq!(diff.count(), 1);
    assert_eq!(diff.get(0).unwrap(), &article(2, "b"));
}

#[test]
fn test_extension_methods_act_like_built_ins() {
    register_extension::<GenericList, _>("typed_tests_titles", |list, _| {
        let titles: Vec<String> = list
            .to_array()
            .iter()
            .filter_map(|value| value.downcast_ref::<Article>().map(|a| a.title.clone()))
            .collect();
        Ok(Value::new(titles))
    })
    .unwrap();

    let mut articles = GenericList::with_values(
        TypeToken::of::<Article>(),
        vec![article(1, "first"), article(2, "second")],
    )
    .unwrap();

    let titles = call_extension("typed_tests_titles", &mut articles, &[]).unwrap();
    assert_eq!(
        titles,
        Value::new(vec!["first".to_string(), "second".to_string()])
    );

    // An unregistered name is an unknown method.
    assert!(matches!(
        call_extension("typed_tests_unknown", &mut articles, &[]),
        Err(CollectionError::InvalidOperation(_))
    ));
}
