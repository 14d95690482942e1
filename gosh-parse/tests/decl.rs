mod common;

use common::*;
use gosh_ast::{
    synthetic_span, BinOp, ChanDir, ConstDecl, ConstSet, Expr, ExprKind, FuncLiteral, FuncType,
    ImportSet, ImportStmt, InterfaceMethod, MethodikDecl, Named, Stmt, StructField, Type,
    TypeDecl, TypeDeclSet, VarDecl, VarSet,
};

fn var(names: &[&str], ty: Option<Type>, values: Vec<Expr>) -> VarDecl {
    VarDecl {
        span: synthetic_span(),
        names: names.iter().map(|n| n.to_string()).collect(),
        ty,
        values,
    }
}

fn konst(names: &[&str], ty: Option<Type>, values: Vec<Expr>) -> ConstDecl {
    ConstDecl {
        span: synthetic_span(),
        names: names.iter().map(|n| n.to_string()).collect(),
        ty,
        values,
    }
}

fn named(name: &str, underlying: Type) -> Type {
    Type::Named(Named {
        name: name.to_string(),
        ty: Box::new(underlying),
        method_names: Vec::new(),
        methods: Vec::new(),
    })
}

fn type_decl(name: &str, underlying: Type) -> TypeDecl {
    TypeDecl {
        span: synthetic_span(),
        name: name.to_string(),
        ty: named(name, underlying),
    }
}

fn field(name: &str, ty: Type) -> StructField {
    StructField {
        name: name.to_string(),
        ty,
        tag: None,
        embedded: false,
    }
}

fn embedded(name: &str, ty: Type) -> StructField {
    StructField {
        name: name.to_string(),
        ty,
        tag: None,
        embedded: true,
    }
}

fn tagged(name: &str, ty: Type, tag: &str) -> StructField {
    StructField {
        tag: Some(tag.to_string()),
        ..field(name, ty)
    }
}

fn array(len: u64, elem: Type) -> Type {
    Type::Array {
        len,
        elem: Box::new(elem),
        ellipsis: false,
    }
}

fn ellipsis_array(len: u64, elem: Type) -> Type {
    Type::Array {
        len,
        elem: Box::new(elem),
        ellipsis: true,
    }
}

fn slice_of(elem: Type) -> Type {
    Type::Slice(Box::new(elem))
}

#[test]
fn const_declarations() {
    let int64 = || Some(ty("int64"));
    assert_stmt("const x = 4", &Stmt::Const(konst(&["x"], None, vec![int(4)])));
    assert_stmt("const x int64 = 4", &Stmt::Const(konst(&["x"], int64(), vec![int(4)])));
    assert_stmt(
        "const i, j = 4, 5",
        &Stmt::Const(konst(&["i", "j"], None, vec![int(4), int(5)])),
    );
    assert_stmt(
        "const i, j int64 = 4, 5",
        &Stmt::Const(konst(&["i", "j"], int64(), vec![int(4), int(5)])),
    );
    assert_stmt(
        "const i, j = 4, 5.0",
        &Stmt::Const(konst(&["i", "j"], None, vec![int(4), float("5.0")])),
    );
}

#[test]
fn const_groups() {
    let set = |consts| {
        Stmt::ConstSet(ConstSet {
            span: synthetic_span(),
            consts,
        })
    };
    assert_stmt(
        "const (\n\tx = 4\n)",
        &set(vec![konst(&["x"], None, vec![int(4)])]),
    );
    assert_stmt(
        "const (\n\tx int64 = 4\n)",
        &set(vec![konst(&["x"], Some(ty("int64")), vec![int(4)])]),
    );
    assert_stmt(
        "const (\n\tx, y = 1, 2\n\tz, w = 3, 4\n)",
        &set(vec![
            konst(&["x", "y"], None, vec![int(1), int(2)]),
            konst(&["z", "w"], None, vec![int(3), int(4)]),
        ]),
    );
    assert_stmt(
        "const (\n\tx, y int64   = 1, 2\n\tz, w float64 = 3, 4\n)",
        &set(vec![
            konst(&["x", "y"], Some(ty("int64")), vec![int(1), int(2)]),
            konst(&["z", "w"], Some(ty("float64")), vec![int(3), int(4)]),
        ]),
    );
    assert_stmt(
        "const (\n\ta = iota\n\tb\n\tc\n)",
        &set(vec![
            konst(&["a"], None, vec![ident("iota")]),
            konst(&["b"], None, vec![]),
            konst(&["c"], None, vec![]),
        ]),
    );
}

#[test]
fn var_declarations() {
    let cases = vec![
        ("var i = 10", var(&["i"], None, vec![int(10)])),
        ("var i int", var(&["i"], Some(ty("int")), vec![])),
        ("var i int = 11", var(&["i"], Some(ty("int")), vec![int(11)])),
        ("var i, j = 1, 2", var(&["i", "j"], None, vec![int(1), int(2)])),
        (
            "var i, j int64 = 1, 2",
            var(&["i", "j"], Some(ty("int64")), vec![int(1), int(2)]),
        ),
        ("var i, j int64", var(&["i", "j"], Some(ty("int64")), vec![])),
        (
            "var i map[string]int",
            var(
                &["i"],
                Some(Type::Map {
                    key: Box::new(ty("string")),
                    value: Box::new(ty("int")),
                }),
                vec![],
            ),
        ),
        (
            "var i chan int",
            var(
                &["i"],
                Some(Type::Chan {
                    dir: ChanDir::Both,
                    elem: Box::new(ty("int")),
                }),
                vec![],
            ),
        ),
        ("var i []int", var(&["i"], Some(slice_of(ty("int"))), vec![])),
        ("var i [2]int", var(&["i"], Some(array(2, ty("int"))), vec![])),
        ("var i string", var(&["i"], Some(ty("string")), vec![])),
        ("var i struct{}", var(&["i"], Some(Type::Struct(vec![])), vec![])),
    ];
    for (src, want) in cases {
        assert_stmt(src, &Stmt::Var(want));
    }
}

#[test]
fn names_may_share_one_multi_valued_initializer() {
    let f = || call(ident("f"), vec![]);
    assert_stmt(
        "var a, b = f()",
        &Stmt::Var(var(&["a", "b"], None, vec![f()])),
    );
    assert_stmt(
        "var (\n\ta, b = f()\n\tc int\n)",
        &Stmt::VarSet(VarSet {
            span: synthetic_span(),
            vars: vec![
                var(&["a", "b"], None, vec![f()]),
                var(&["c"], Some(ty("int")), vec![]),
            ],
        }),
    );
    assert_stmt(
        "const a, b = f()",
        &Stmt::Const(konst(&["a", "b"], None, vec![f()])),
    );
}

#[test]
fn array_and_slice_literals() {
    let lit = |ty: Type, keys: Vec<Expr>, values: Vec<Expr>| {
        let kind = match ty {
            Type::Slice(_) => ExprKind::SliceLit { ty, keys, values },
            _ => ExprKind::ArrayLit { ty, keys, values },
        };
        Stmt::Var(var(&["i"], None, vec![Expr::synthetic(kind)]))
    };
    assert_stmt(
        "var i = [2]int{1,2}",
        &lit(array(2, ty("int")), vec![], vec![int(1), int(2)]),
    );
    assert_stmt(
        "var i = [2]int{1:2}",
        &lit(array(2, ty("int")), vec![int(1)], vec![int(2)]),
    );
    assert_stmt(
        "var i = [...]int{1,2}",
        &lit(ellipsis_array(2, ty("int")), vec![], vec![int(1), int(2)]),
    );
    assert_stmt(
        "var i = [...]int{1:2}",
        &lit(ellipsis_array(2, ty("int")), vec![int(1)], vec![int(2)]),
    );
    assert_stmt(
        "var i = [...]int{5: 1, 2: 0}",
        &lit(
            ellipsis_array(6, ty("int")),
            vec![int(5), int(2)],
            vec![int(1), int(0)],
        ),
    );
    assert_stmt(
        "var i = []int{1:2}",
        &lit(slice_of(ty("int")), vec![int(1)], vec![int(2)]),
    );
}

#[test]
fn array_lengths_are_constant_folded() {
    assert_stmt("var a [2*3+1]int", &Stmt::Var(var(&["a"], Some(array(7, ty("int"))), vec![])));
    assert_stmt("var a [(4-1)/3]int", &Stmt::Var(var(&["a"], Some(array(1, ty("int"))), vec![])));
}

#[test]
fn var_groups() {
    assert_stmt(
        "var (\n\ti int = 11\n\tj = 22\n\tk float64\n)\n",
        &Stmt::VarSet(VarSet {
            span: synthetic_span(),
            vars: vec![
                var(&["i"], Some(ty("int")), vec![int(11)]),
                var(&["j"], None, vec![int(22)]),
                var(&["k"], Some(ty("float64")), vec![]),
            ],
        }),
    );
}

#[test]
fn type_declarations() {
    assert_stmt(
        "type A integer",
        &Stmt::TypeDecl(type_decl("A", ty("integer"))),
    );
    assert_stmt(
        "type Array [2]int",
        &Stmt::TypeDecl(type_decl("Array", array(2, ty("int")))),
    );
    assert_stmt(
        "type S struct { x integer }",
        &Stmt::TypeDecl(type_decl("S", Type::Struct(vec![field("x", ty("integer"))]))),
    );
    assert_stmt(
        "type P *pkg.T",
        &Stmt::TypeDecl(type_decl("P", Type::pointer(Type::qualified("pkg", "T")))),
    );
}

#[test]
fn type_groups() {
    assert_stmt(
        "type (\n\tT int64\n\tS struct { x int64 }\n)",
        &Stmt::TypeDeclSet(TypeDeclSet {
            span: synthetic_span(),
            decls: vec![
                type_decl("T", ty("int64")),
                type_decl("S", Type::Struct(vec![field("x", ty("int64"))])),
            ],
        }),
    );
}

#[test]
fn embedded_struct_fields() {
    let want = |f: StructField| Stmt::TypeDecl(type_decl("T", Type::Struct(vec![f])));
    assert_stmt("type T struct { S }", &want(embedded("S", ty("S"))));
    assert_stmt("type T struct {\n\tS\n}", &want(embedded("S", ty("S"))));
    assert_stmt(
        "type T struct { *S }",
        &want(embedded("S", Type::pointer(ty("S")))),
    );
    assert_stmt(
        "type T struct {\n\t*S\n}",
        &want(embedded("S", Type::pointer(ty("S")))),
    );
    assert_stmt(
        "type T struct { pkg.S }",
        &want(embedded("S", Type::qualified("pkg", "S"))),
    );
}

#[test]
fn struct_tags_keep_their_text() {
    let want = |tag: &str| {
        Stmt::TypeDecl(type_decl(
            "T",
            Type::Struct(vec![tagged("A", ty("string"), tag)]),
        ))
    };
    assert_stmt("type T struct { A string `json` }", &want("json"));
    assert_stmt("type T struct { A string \"json\" }", &want("json"));
    assert_stmt("type T struct { A string `json:\"a\"` }", &want("json:\"a\""));
    assert_stmt("type T struct { A string \"json:\\\"a\\\"\" }", &want("json:\\\"a\\\""));
}

#[test]
fn struct_field_lists() {
    let byte4 = || array(4, ty("byte"));
    assert_stmt(
        "type T struct {\n\t_ [4]byte\n\tN string\n\t_ [4]byte\n}",
        &Stmt::TypeDecl(type_decl(
            "T",
            Type::Struct(vec![
                field("_", byte4()),
                field("N", ty("string")),
                field("_", byte4()),
            ]),
        )),
    );
    let xy = Stmt::TypeDecl(type_decl(
        "T",
        Type::Struct(vec![field("X", ty("int")), field("Y", ty("int"))]),
    ));
    assert_stmt("type T struct { X, Y int }", &xy);
    assert_stmt("type T struct {\n\tX, Y int\n}", &xy);
}

#[test]
fn interface_and_channel_types() {
    assert_stmt(
        "type R interface {\n\tRead(p []byte) (n int, err error)\n\tClose() error\n}",
        &Stmt::TypeDecl(type_decl(
            "R",
            Type::Interface(vec![
                InterfaceMethod {
                    name: "Read".into(),
                    ty: func_type(
                        vec![slice_of(ty("byte"))],
                        Some(vec![ty("int"), ty("error")]),
                    ),
                },
                InterfaceMethod {
                    name: "Close".into(),
                    ty: func_type(vec![], Some(vec![ty("error")])),
                },
            ]),
        )),
    );
    let chan = |dir| Type::Chan {
        dir,
        elem: Box::new(ty("int")),
    };
    assert_stmt("var c chan<- int", &Stmt::Var(var(&["c"], Some(chan(ChanDir::Send)), vec![])));
    assert_stmt("var c <-chan int", &Stmt::Var(var(&["c"], Some(chan(ChanDir::Recv)), vec![])));
    assert_stmt(
        "var f func(int, string) bool",
        &Stmt::Var(var(
            &["f"],
            Some(Type::Func(func_type(
                vec![ty("int"), ty("string")],
                Some(vec![ty("bool")]),
            ))),
            vec![],
        )),
    );
}

fn method(name: &str, ty: FuncType, pointer: bool, body: Vec<Stmt>) -> FuncLiteral {
    FuncLiteral {
        name: Some(name.to_string()),
        receiver_name: Some("a".to_string()),
        pointer_receiver: pointer,
        ..func_lit(ty, body)
    }
}

#[test]
fn methodik_declarations() {
    let sig = func_type(vec![], Some(vec![ty("integer")]));
    assert_stmt(
        "methodik AnInt integer {\n\tfunc (a) f() integer { return a }\n}\n",
        &Stmt::Methodik(MethodikDecl {
            span: synthetic_span(),
            name: "AnInt".into(),
            ty: Type::Named(Named {
                name: "AnInt".into(),
                ty: Box::new(ty("integer")),
                method_names: vec!["f".into()],
                methods: vec![sig.clone()],
            }),
            methods: vec![method("f", sig, false, vec![ret(vec![ident("a")])])],
        }),
    );
}

#[test]
fn methodik_on_pointer_type_uses_pointer_receivers() {
    let src = "methodik T *struct{
		x integer
		y [|]int64
	} {
		func (a) f(x integer) integer {
			return a.x
		}
	}
	";
    let underlying = Type::pointer(Type::Struct(vec![
        field("x", ty("integer")),
        field("y", Type::Table(Box::new(ty("int64")))),
    ]));
    let sig = func_type(vec![ty("integer")], Some(vec![ty("integer")]));
    let mut f = method("f", sig.clone(), true, vec![ret(vec![sel(ident("a"), "x")])]);
    f.param_names = vec!["x".into()];
    assert_stmt(
        src,
        &Stmt::Methodik(MethodikDecl {
            span: synthetic_span(),
            name: "T".into(),
            ty: Type::Named(Named {
                name: "T".into(),
                ty: Box::new(underlying),
                method_names: vec!["f".into()],
                methods: vec![sig],
            }),
            methods: vec![f],
        }),
    );
}

#[test]
fn explicit_pointer_receiver() {
    let sig = func_type(vec![ty("int")], None);
    let mut f = method(
        "inc",
        sig.clone(),
        true,
        vec![assign(
            false,
            vec![sel(ident("a"), "n")],
            vec![bin(BinOp::Add, sel(ident("a"), "n"), ident("d"))],
        )],
    );
    f.param_names = vec!["d".into()];
    assert_stmt(
        "methodik C struct{ n int } {\n\tfunc (*a) inc(d int) { a.n += d }\n}",
        &Stmt::Methodik(MethodikDecl {
            span: synthetic_span(),
            name: "C".into(),
            ty: Type::Named(Named {
                name: "C".into(),
                ty: Box::new(Type::Struct(vec![field("n", ty("int"))])),
                method_names: vec!["inc".into()],
                methods: vec![sig],
            }),
            methods: vec![f],
        }),
    );
}

#[test]
fn named_function_declarations() {
    let mut f = func_lit(
        func_type(vec![ty("int"), ty("int")], Some(vec![ty("int")])),
        vec![ret(vec![bin(BinOp::Add, ident("a"), ident("b"))])],
    );
    f.name = Some("add".into());
    f.param_names = vec!["a".into(), "b".into()];
    assert_stmt("func add(a, b int) int { return a + b }", &simple(func_expr(f)));
}

#[test]
fn imports() {
    let import = |name: Option<&str>, path: &str| ImportStmt {
        span: synthetic_span(),
        name: name.map(str::to_string),
        path: path.to_string(),
    };
    assert_stmt("import \"fmt\"", &Stmt::Import(import(None, "fmt")));
    assert_stmt("import f \"fmt\"", &Stmt::Import(import(Some("f"), "fmt")));
    assert_stmt(
        "import (\n\t\"os\"\n\t. \"strings\"\n\tgh \"github.com/x/y\"\n)",
        &Stmt::ImportSet(ImportSet {
            span: synthetic_span(),
            imports: vec![
                import(None, "os"),
                import(Some("."), "strings"),
                import(Some("gh"), "github.com/x/y"),
            ],
        }),
    );
}
