use base_elem::{has_listener, ListenerOptions, Selection, Target};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Node};

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::{by_id, fixture};

const LIST: &str = r#"<ul id="selection-list"><li class="odd">1</li><li>2</li><li class="odd">3</li></ul>"#;

fn list_items() -> Selection {
	Selection::select_in("li", &Target::from(fixture(LIST))).unwrap()
}

fn ids(selection: &Selection) -> Vec<String> {
	selection.map(|target, _| target.as_element().map(Element::id), false)
}

#[wasm_bindgen_test]
fn explicit_order_is_kept() {
	fixture(r#"<i id="order-1"></i><i id="order-2"></i><i id="order-3"></i>"#);
	let (e1, e2, e3) = (by_id("order-1"), by_id("order-2"), by_id("order-3"));

	let selection = Selection::from_targets(vec![e3.clone(), e1.clone(), e2.clone(), e3.clone()]);
	assert_eq!(
		selection.to_vec(),
		vec![Target::from(e3.clone()), Target::from(e1), Target::from(e2), Target::from(e3)]
	);
}

#[wasm_bindgen_test]
fn select_in_document_order() {
	fixture(r#"<ol id="select-document"><li>1</li><li>2</li><li>3</li></ol>"#);
	let items = Selection::select("#select-document li").unwrap();
	assert_eq!(items.len(), 3);
	assert!(items.has_elements());
	assert_eq!(items.map(|target, _| target.as_element().and_then(|element| element.text_content()), false), vec!["1", "2", "3"]);
}

#[wasm_bindgen_test]
fn filter_leaves_original_unchanged() {
	let items = list_items();
	let before = items.to_vec();

	let odd = items.filter(|target, _| target.as_element().map_or(false, |element| element.class_name() == "odd"));
	assert_eq!(items.to_vec(), before);
	assert_eq!(odd.to_vec(), vec![before[0].clone(), before[2].clone()]);

	let by_index = items.filter(|_, i| i == 1);
	assert_eq!(by_index.to_vec(), vec![before[1].clone()]);
}

#[wasm_bindgen_test]
fn find_and_find_one() {
	let container = fixture(r#"<p><b id="find-1"></b><b id="find-2"></b></p><p><b id="find-3"></b></p>"#);
	let paragraphs = Selection::select_in("p", &Target::from(container)).unwrap();
	assert_eq!(paragraphs.len(), 2);

	assert_eq!(ids(&paragraphs.find("b").unwrap()), vec!["find-1", "find-2", "find-3"]);
	assert_eq!(ids(&paragraphs.find_one("b").unwrap()), vec!["find-1", "find-3"]);
	assert!(paragraphs.find("table").unwrap().is_empty());
	assert!(paragraphs.find("[[").is_err());
}

#[wasm_bindgen_test]
fn find_map_skips_repeats() {
	let items = list_items();
	let lists = items.find_map(|target, _| {
		let parent = target.as_element()?.parent_node()?;
		parent.dyn_into::<Element>().ok().map(Target::from)
	});
	assert_eq!(ids(&lists), vec!["selection-list"]);
}

#[wasm_bindgen_test]
fn parents() {
	let container = fixture(
		r#"<div class="box" id="parents-outer"><div class="box stop" id="parents-middle"><div class="box" id="parents-inner">
			<b id="parents-leaf-1"></b><b id="parents-leaf-2"></b>
		</div></div></div>"#,
	);
	let leaves = Selection::select_in("b", &Target::from(container)).unwrap();
	assert_eq!(leaves.len(), 2);

	assert_eq!(ids(&leaves.parents(".box", None).unwrap()), vec!["parents-inner"]);
	assert_eq!(ids(&leaves.parents(".box", Some(".stop")).unwrap()), vec!["parents-middle", "parents-inner"]);
	assert_eq!(
		ids(&leaves.parents(".box", Some(".missing")).unwrap()),
		vec!["parents-outer", "parents-middle", "parents-inner"]
	);
	assert!(leaves.parents("table", None).unwrap().is_empty());
	assert!(leaves.parents(".box", Some("[[")).is_err());
}

#[wasm_bindgen_test]
fn get() {
	let items = list_items();
	assert_eq!(items.get(1).unwrap().to_vec(), vec![items.to_vec()[1].clone()]);
	assert_eq!(items.get(3), None);
}

#[wasm_bindgen_test]
fn each_is_ordered_and_chains() {
	let items = list_items();
	let mut seen = Vec::new();
	let returned = items.each(|target, i| {
		let node: &Node = target.as_element().unwrap().as_ref();
		seen.push((i, node.text_content().unwrap()));
	});
	assert!(std::ptr::eq(returned, &items));
	assert_eq!(seen, vec![(0, "1".to_owned()), (1, "2".to_owned()), (2, "3".to_owned())]);
}

#[wasm_bindgen_test]
fn event_fan_out() {
	let items = list_items();
	let log = Rc::new(RefCell::new(Vec::new()));

	items
		.on(
			&["[open].items", "[close].items"],
			{
				let log = Rc::clone(&log);
				move |event: &web_sys::Event, target: &Target| {
					log.borrow_mut().push((event.type_(), target.as_element().unwrap().text_content().unwrap()));
				}
			},
			None,
			false,
		)
		.unwrap()
		.trigger("[open].items", None)
		.unwrap();

	assert_eq!(
		*log.borrow(),
		vec![
			("[open].items".to_owned(), "1".to_owned()),
			("[open].items".to_owned(), "2".to_owned()),
			("[open].items".to_owned(), "3".to_owned()),
		]
	);

	items.off("[open].items", ListenerOptions::new()).unwrap().trigger("[open].items", None).unwrap();
	assert_eq!(log.borrow().len(), 3);
	for target in &items {
		assert!(!has_listener(target, "[open].items"));
		assert!(has_listener(target, "[close].items"));
	}

	items.off(&vec!["[close].items".to_owned()], false).unwrap();
	assert!(items.iter().all(|target| !has_listener(target, "[close].items")));
}

#[wasm_bindgen_test]
fn clone_is_shallow() {
	let items = list_items();
	let copy = items.clone();
	let narrowed = copy.filter(|_, i| i == 0);

	assert_eq!(copy, items);
	assert_eq!(narrowed.len(), 1);
	assert_eq!(narrowed.first(), items.first());
}
