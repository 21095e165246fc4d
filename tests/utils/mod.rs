//! Hand-built rustdoc data shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use rustdoc_types::{
	Abi, Crate, Function, FunctionHeader, FunctionSignature, Generics, Id, Impl, Item, ItemEnum,
	ItemKind, ItemSummary, Module, Path, Span, Struct, StructKind, Target, Trait, Type, Use,
	Visibility,
};

pub const ROOT: Id = Id(0);
pub const LAYERS: Id = Id(1);
pub const DENSE: Id = Id(2);
pub const ACTIVATION: Id = Id(3);
pub const DENSE_UNITS: Id = Id(4);
pub const DENSE_IMPL: Id = Id(5);
pub const DENSE_NEW: Id = Id(6);
pub const DENSE_CALL: Id = Id(7);
pub const DENSE_MERGE: Id = Id(8);
pub const DENSE_LAYER_IMPL: Id = Id(9);
pub const USE_DENSE: Id = Id(10);
pub const USE_ACTIVATION: Id = Id(11);
pub const GLOB_LAYERS: Id = Id(12);
pub const GLOB_CYCLE: Id = Id(13);
pub const DENSE_FORWARD: Id = Id(14);
pub const DENSE_LAYER_CALL: Id = Id(15);
pub const RELU: Id = Id(20);
pub const INTERNAL: Id = Id(21);
pub const LAYER: Id = Id(30);
pub const LAYER_FORWARD: Id = Id(31);
pub const SHAPE: Id = Id(32);
pub const SHAPE_ROWS: Id = Id(33);
pub const SHAPE_COLS: Id = Id(34);
pub const LAYER_CALL: Id = Id(35);
pub const CYCLE: Id = Id(40);
pub const CYCLE_GLOB: Id = Id(41);

pub const DENSE_DOCS: &str = "Just your regular densely-connected layer.\n\n# Arguments\n    units: Positive integer,\n        dimensionality of the output space.\n    activation: Activation function to use.";

pub fn empty_generics() -> Generics {
	Generics {
		params: Vec::new(),
		where_predicates: Vec::new(),
	}
}

pub fn default_header() -> FunctionHeader {
	FunctionHeader {
		is_const: false,
		is_unsafe: false,
		is_async: false,
		abi: Abi::Rust,
	}
}

fn span(file: &str, line: usize) -> Option<Span> {
	Some(Span {
		filename: file.into(),
		begin: (line, 1),
		end: (line + 1, 1),
	})
}

fn item(id: Id, name: Option<&str>, docs: Option<&str>, span: Option<Span>, inner: ItemEnum) -> Item {
	Item {
		id,
		crate_id: 0,
		name: name.map(str::to_string),
		span,
		visibility: Visibility::Public,
		docs: docs.map(str::to_string),
		links: HashMap::new(),
		attrs: Vec::new(),
		deprecation: None,
		inner,
	}
}

fn resolved(name: &str, id: Id) -> Type {
	Type::ResolvedPath(Path {
		path: name.into(),
		id,
		args: None,
	})
}

fn function(inputs: Vec<(&str, Type)>, output: Option<Type>) -> ItemEnum {
	ItemEnum::Function(Function {
		sig: FunctionSignature {
			inputs: inputs
				.into_iter()
				.map(|(name, ty)| (name.to_string(), ty))
				.collect(),
			output,
			is_c_variadic: false,
		},
		generics: empty_generics(),
		header: default_header(),
		has_body: true,
	})
}

fn reexport(source: &str, name: &str, target: Id) -> ItemEnum {
	ItemEnum::Use(Use {
		source: source.into(),
		name: name.into(),
		id: Some(target),
		is_glob: false,
	})
}

fn glob(source: &str, target: Id) -> ItemEnum {
	ItemEnum::Use(Use {
		source: source.into(),
		name: source.rsplit("::").next().unwrap_or(source).into(),
		id: Some(target),
		is_glob: true,
	})
}

fn self_type() -> Type {
	Type::Generic("Self".into())
}

fn self_ref() -> Type {
	Type::BorrowedRef {
		lifetime: None,
		is_mutable: false,
		type_: Box::new(self_type()),
	}
}

/// Crate `pkg`:
///
/// ```text
/// pub mod layers {
///     pub struct Dense { pub units: usize }
///     impl Dense {
///         pub fn new(units: usize, activation: Activation) -> Self;
///         pub fn call(&mut self, other: Dense) -> Dense;
///         pub fn merge(&self, other: &Self) -> Self;
///     }
///     impl Layer for Dense {
///         fn forward(&self, x: f32) -> Self;
///         fn call(&self);
///     }
///     pub trait Layer {
///         fn forward(&self, x: f32) -> Self;
///         fn call(&self);
///     }
///     pub struct Activation;
///     pub struct Shape(pub usize, pub usize); // rustdoc path: pkg::shapes::Shape
///     fn internal();
/// }
/// pub mod cycle { pub use super::*; }
/// pub use layers::{Activation, Dense};
/// pub use layers::*;
/// pub use cycle::*;
/// pub fn relu(x: f32) -> f32;
/// ```
pub fn pkg_crate() -> Crate {
	let mut index = HashMap::new();
	let mut insert = |item: Item| {
		index.insert(item.id, item);
	};

	insert(item(
		ROOT,
		Some("pkg"),
		Some("Layers for building networks."),
		span("src/lib.rs", 1),
		ItemEnum::Module(Module {
			is_crate: true,
			items: vec![LAYERS, CYCLE, USE_DENSE, USE_ACTIVATION, GLOB_LAYERS, GLOB_CYCLE, RELU],
			is_stripped: false,
		}),
	));
	insert(item(
		LAYERS,
		Some("layers"),
		None,
		span("src/layers.rs", 1),
		ItemEnum::Module(Module {
			is_crate: false,
			items: vec![DENSE, LAYER, ACTIVATION, SHAPE, INTERNAL],
			is_stripped: false,
		}),
	));
	insert(item(
		DENSE,
		Some("Dense"),
		Some(DENSE_DOCS),
		span("src/layers.rs", 10),
		ItemEnum::Struct(Struct {
			kind: StructKind::Plain {
				fields: vec![DENSE_UNITS],
				has_stripped_fields: false,
			},
			generics: empty_generics(),
			impls: vec![DENSE_LAYER_IMPL, DENSE_IMPL],
		}),
	));
	insert(item(
		DENSE_UNITS,
		Some("units"),
		None,
		span("src/layers.rs", 11),
		ItemEnum::StructField(Type::Primitive("usize".into())),
	));
	insert(item(
		DENSE_IMPL,
		None,
		None,
		span("src/layers.rs", 14),
		ItemEnum::Impl(Impl {
			is_unsafe: false,
			generics: empty_generics(),
			provided_trait_methods: Vec::new(),
			trait_: None,
			for_: resolved("Dense", DENSE),
			items: vec![DENSE_NEW, DENSE_CALL, DENSE_MERGE],
			is_negative: false,
			is_synthetic: false,
			blanket_impl: None,
		}),
	));
	insert(item(
		DENSE_NEW,
		Some("new"),
		Some("Create a layer."),
		span("src/layers.rs", 16),
		function(
			vec![
				("units", Type::Primitive("usize".into())),
				("activation", resolved("Activation", ACTIVATION)),
			],
			Some(Type::Generic("Self".into())),
		),
	));
	insert(item(
		DENSE_CALL,
		Some("call"),
		Some("Apply the layer to another one.\n\n# Returns\n    The combined layer."),
		span("src/layers.rs", 22),
		function(
			vec![
				(
					"self",
					Type::BorrowedRef {
						lifetime: None,
						is_mutable: true,
						type_: Box::new(Type::Generic("Self".into())),
					},
				),
				("other", resolved("Dense", DENSE)),
			],
			Some(resolved("Dense", DENSE)),
		),
	));
	insert(item(
		DENSE_MERGE,
		Some("merge"),
		Some("Merge two layers."),
		span("src/layers.rs", 28),
		function(vec![("self", self_ref()), ("other", self_ref())], Some(self_type())),
	));
	insert(item(
		DENSE_LAYER_IMPL,
		None,
		None,
		span("src/layers.rs", 32),
		ItemEnum::Impl(Impl {
			is_unsafe: false,
			generics: empty_generics(),
			provided_trait_methods: Vec::new(),
			trait_: Some(Path {
				path: "Layer".into(),
				id: LAYER,
				args: None,
			}),
			for_: resolved("Dense", DENSE),
			items: vec![DENSE_FORWARD, DENSE_LAYER_CALL],
			is_negative: false,
			is_synthetic: false,
			blanket_impl: None,
		}),
	));
	insert(item(
		DENSE_FORWARD,
		Some("forward"),
		Some("Forward pass through the dense layer."),
		span("src/layers.rs", 33),
		function(
			vec![("self", self_ref()), ("x", Type::Primitive("f32".into()))],
			Some(self_type()),
		),
	));
	insert(item(
		DENSE_LAYER_CALL,
		Some("call"),
		Some("Layer trait call."),
		span("src/layers.rs", 35),
		function(vec![("self", self_ref())], None),
	));
	insert(item(
		LAYER,
		Some("Layer"),
		Some("Something that transforms inputs."),
		span("src/layers.rs", 60),
		ItemEnum::Trait(Trait {
			is_auto: false,
			is_unsafe: false,
			is_dyn_compatible: true,
			items: vec![LAYER_FORWARD, LAYER_CALL],
			generics: empty_generics(),
			bounds: Vec::new(),
			implementations: vec![DENSE_LAYER_IMPL],
		}),
	));
	insert(item(
		LAYER_FORWARD,
		Some("forward"),
		Some("Run the layer."),
		span("src/layers.rs", 62),
		function(
			vec![("self", self_ref()), ("x", Type::Primitive("f32".into()))],
			Some(self_type()),
		),
	));
	insert(item(
		LAYER_CALL,
		Some("call"),
		None,
		span("src/layers.rs", 64),
		function(vec![("self", self_ref())], None),
	));
	insert(item(
		SHAPE,
		Some("Shape"),
		Some("Rows and columns."),
		span("src/layers.rs", 70),
		ItemEnum::Struct(Struct {
			kind: StructKind::Tuple(vec![Some(SHAPE_ROWS), Some(SHAPE_COLS)]),
			generics: empty_generics(),
			impls: Vec::new(),
		}),
	));
	insert(item(
		SHAPE_ROWS,
		Some("0"),
		None,
		span("src/layers.rs", 70),
		ItemEnum::StructField(Type::Primitive("usize".into())),
	));
	insert(item(
		SHAPE_COLS,
		Some("1"),
		None,
		span("src/layers.rs", 70),
		ItemEnum::StructField(Type::Primitive("usize".into())),
	));
	insert(item(
		CYCLE,
		Some("cycle"),
		None,
		span("src/cycle.rs", 1),
		ItemEnum::Module(Module {
			is_crate: false,
			items: vec![CYCLE_GLOB],
			is_stripped: false,
		}),
	));
	insert(item(CYCLE_GLOB, None, None, None, glob("super", ROOT)));
	insert(item(GLOB_LAYERS, None, None, None, glob("layers", LAYERS)));
	insert(item(GLOB_CYCLE, None, None, None, glob("cycle", CYCLE)));
	insert(item(
		ACTIVATION,
		Some("Activation"),
		Some("Activation function."),
		span("src/layers.rs", 40),
		ItemEnum::Struct(Struct {
			kind: StructKind::Unit,
			generics: empty_generics(),
			impls: Vec::new(),
		}),
	));
	insert(item(
		INTERNAL,
		Some("internal"),
		None,
		span("src/layers.rs", 50),
		function(Vec::new(), None),
	));
	insert(item(USE_DENSE, None, None, None, reexport("layers::Dense", "Dense", DENSE)));
	insert(item(
		USE_ACTIVATION,
		None,
		None,
		None,
		reexport("layers::Activation", "Activation", ACTIVATION),
	));
	insert(item(
		RELU,
		Some("relu"),
		Some("Rectified linear unit."),
		span("src/lib.rs", 3),
		function(
			vec![("x", Type::Primitive("f32".into()))],
			Some(Type::Primitive("f32".into())),
		),
	));

	Crate {
		root: ROOT,
		crate_version: Some("0.1.0".into()),
		includes_private: false,
		index,
		paths: HashMap::from([(
			SHAPE,
			ItemSummary {
				crate_id: 0,
				path: vec!["pkg".into(), "shapes".into(), "Shape".into()],
				kind: ItemKind::Struct,
			},
		)]),
		external_crates: HashMap::new(),
		target: Target {
			triple: "test-target".into(),
			target_features: Vec::new(),
		},
		format_version: 0,
	}
}
