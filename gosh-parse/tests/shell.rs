mod common;

use common::*;
use gosh_ast::{
    AndOrSep, RedirectOp, ShellAssign, ShellCmd, ShellPipeline, ShellRedirect, ShellSimpleCmd,
};

fn redirect(number: Option<u32>, token: RedirectOp, filename: &str) -> ShellRedirect {
    ShellRedirect {
        number,
        token,
        filename: filename.to_string(),
    }
}

fn cmd_with(args: &[&str], redirects: Vec<ShellRedirect>) -> ShellCmd {
    ShellCmd::Simple(ShellSimpleCmd {
        redirect: redirects,
        ..ShellSimpleCmd::args(args.iter().copied())
    })
}

#[test]
fn empty_shell() {
    assert_shell("", &shell(vec![], true));
}

#[test]
fn simple_commands() {
    assert_shell("ls -l", &simple_shell(&["ls", "-l"]));
    assert_shell("echo -n not_a_file_*", &simple_shell(&["echo", "-n", "not_a_file_*"]));
    assert_shell("echo -n a${VAL}c ", &simple_shell(&["echo", "-n", "a${VAL}c"]));
    assert_shell("echo $HOME $? $1", &simple_shell(&["echo", "$HOME", "$?", "$1"]));
}

#[test]
fn words_keep_their_quoting() {
    assert_shell(
        r#"grep -R "fun*foo" ."#,
        &simple_shell(&["grep", "-R", r#""fun*foo""#, "."]),
    );
    assert_shell(r#"echo -n "\"""#, &simple_shell(&["echo", "-n", r#""\"""#]));
    assert_shell(
        r#"echo "a b \"" 'c \' \d "e f'g""#,
        &simple_shell(&["echo", r#""a b \"""#, r"'c \'", r"\d", r#""e f'g""#]),
    );
    assert_shell(
        r#"go build "-ldflags=-v -extldflags=-v" pkg"#,
        &simple_shell(&["go", "build", r#""-ldflags=-v -extldflags=-v""#, "pkg"]),
    );
}

#[test]
fn pipelines() {
    assert_shell(
        "ls | head",
        &shell(
            vec![list(vec![and_or(
                vec![pipeline(vec![cmd(&["ls"]), cmd(&["head"])])],
                vec![],
            )])],
            true,
        ),
    );
}

#[test]
fn negated_pipeline() {
    assert_shell(
        "! grep -q x f",
        &shell(
            vec![list(vec![and_or(
                vec![ShellPipeline {
                    bang: true,
                    cmd: vec![cmd(&["grep", "-q", "x", "f"])],
                }],
                vec![],
            )])],
            true,
        ),
    );
}

#[test]
fn redirections() {
    assert_shell(
        "ls > flist",
        &shell(
            vec![list(vec![single(cmd_with(
                &["ls"],
                vec![redirect(None, RedirectOp::Greater, "flist")],
            ))])],
            true,
        ),
    );
    assert_shell(
        "sort < in >> out 2>&1",
        &shell(
            vec![list(vec![single(cmd_with(
                &["sort"],
                vec![
                    redirect(None, RedirectOp::Less, "in"),
                    redirect(None, RedirectOp::Append, "out"),
                    redirect(Some(2), RedirectOp::GreaterAnd, "1"),
                ],
            ))])],
            true,
        ),
    );
    assert_shell(
        "make &> log",
        &shell(
            vec![list(vec![single(cmd_with(
                &["make"],
                vec![redirect(None, RedirectOp::AndGreater, "log")],
            ))])],
            true,
        ),
    );
    assert_shell(
        "read line 0<&3",
        &shell(
            vec![list(vec![single(cmd_with(
                &["read", "line"],
                vec![redirect(Some(0), RedirectOp::LessAnd, "3")],
            ))])],
            true,
        ),
    );
}

#[test]
fn and_or_lists() {
    assert_shell(
        "echo hi | cat && true || false",
        &shell(
            vec![list(vec![and_or(
                vec![
                    pipeline(vec![cmd(&["echo", "hi"]), cmd(&["cat"])]),
                    pipeline(vec![cmd(&["true"])]),
                    pipeline(vec![cmd(&["false"])]),
                ],
                vec![AndOrSep::And, AndOrSep::Or],
            )])],
            true,
        ),
    );
}

#[test]
fn lists_split_on_newlines_and_join_on_separators() {
    let src = "echo one && echo two > f || echo 3
	echo -n 4;
	echo 5 | wc; echo 6 & echo 7; echo 8 &";
    let first = list(vec![and_or(
        vec![
            pipeline(vec![cmd(&["echo", "one"])]),
            pipeline(vec![cmd_with(
                &["echo", "two"],
                vec![redirect(None, RedirectOp::Greater, "f")],
            )]),
            pipeline(vec![cmd(&["echo", "3"])]),
        ],
        vec![AndOrSep::And, AndOrSep::Or],
    )]);
    let second = list(vec![
        single(cmd(&["echo", "-n", "4"])),
        and_or(
            vec![pipeline(vec![cmd(&["echo", "5"]), cmd(&["wc"])])],
            vec![],
        ),
        background(single(cmd(&["echo", "6"]))),
        single(cmd(&["echo", "7"])),
        background(single(cmd(&["echo", "8"]))),
    ]);
    assert_shell(src, &shell(vec![first, second], true));
}

#[test]
fn subshells() {
    let sub = list(vec![
        single(cmd(&["echo", "a"])),
        single(cmd_with(
            &["echo", "b"],
            vec![redirect(Some(2), RedirectOp::GreaterAnd, "1")],
        )),
    ]);
    assert_shell(
        "echo start; (echo a; echo b 2>&1); echo end",
        &shell(
            vec![list(vec![
                single(cmd(&["echo", "start"])),
                single(ShellCmd::Subshell(sub)),
                single(cmd(&["echo", "end"])),
            ])],
            true,
        ),
    );
}

#[test]
fn nested_subshells() {
    let inner = list(vec![single(cmd(&["pwd"]))]);
    let outer = list(vec![
        single(cmd(&["cd", "/tmp"])),
        single(ShellCmd::Subshell(inner)),
    ]);
    assert_shell(
        "(cd /tmp; (pwd))",
        &shell(vec![list(vec![single(ShellCmd::Subshell(outer))])], true),
    );
}

#[test]
fn environment_assignments() {
    assert_shell(
        "GOOS=linux GOARCH=arm64 go build",
        &shell(
            vec![list(vec![single(ShellCmd::Simple(ShellSimpleCmd {
                assign: vec![
                    ShellAssign {
                        key: "GOOS".into(),
                        value: "linux".into(),
                    },
                    ShellAssign {
                        key: "GOARCH".into(),
                        value: "arm64".into(),
                    },
                ],
                ..ShellSimpleCmd::args(["go", "build"])
            }))])],
            true,
        ),
    );
    // Only leading words are assignments.
    assert_shell("env A=1", &simple_shell(&["env", "A=1"]));
}

#[test]
fn escaped_words_and_multiple_lists() {
    assert_shell(
        "find . -name \\*.c -exec grep -H {} \\;\n\tls",
        &shell(
            vec![
                list(vec![single(cmd(&[
                    "find", ".", "-name", r"\*.c", "-exec", "grep", "-H", "{}", r"\;",
                ]))]),
                list(vec![single(cmd(&["ls"]))]),
            ],
            true,
        ),
    );
}

#[test]
fn line_continuation() {
    assert_shell("ls \\\n-l", &simple_shell(&["ls", "-l"]));
}
