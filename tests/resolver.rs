mod common;

#[cfg(test)]
mod resolver_tests {
    use pretty_assertions::assert_eq;

    use super::common::run;

    fn assert_resolve_error(source: &str, expected: &str) {
        let outcome = run(source);

        assert!(outcome.status.had_compile_error);
        assert!(!outcome.status.had_runtime_error);
        assert_eq!(outcome.errors, vec![expected.to_string()]);
        assert!(outcome.output.is_empty(), "nothing may run: {:?}", outcome.output);
    }

    #[test]
    fn test_redeclaration_in_local_scope() {
        assert_resolve_error(
            "print 0; { var a = 1; var a = 2; }",
            "[line 1] Error at 'a': Already a variable with this name in this scope.",
        );
    }

    #[test]
    fn test_global_redeclaration_is_allowed() {
        let outcome = run("var a = 1; var a = 2; print a;");

        assert_eq!(outcome.errors, Vec::<String>::new());
        assert_eq!(outcome.output, vec!["2"]);
    }

    #[test]
    fn test_read_in_own_initializer() {
        assert_resolve_error(
            "var a = 1; { var a = a; }",
            "[line 1] Error at 'a': Can't read local variable in its own initializer.",
        );
    }

    #[test]
    fn test_top_level_return() {
        assert_resolve_error(
            "return 1;",
            "[line 1] Error at 'return': Can't return from top-level code.",
        );
    }

    #[test]
    fn test_value_returned_from_initializer() {
        assert_resolve_error(
            "class A { init() { return 1; } }",
            "[line 1] Error at 'return': Can't return a value from an initializer.",
        );
    }

    #[test]
    fn test_bare_return_in_initializer_is_allowed() {
        let outcome = run("class A { init() { return; } } print A();");

        assert_eq!(outcome.errors, Vec::<String>::new());
        assert_eq!(outcome.output, vec!["A instance"]);
    }

    #[test]
    fn test_this_outside_class() {
        assert_resolve_error(
            "fun f() { print this; }",
            "[line 1] Error at 'this': Can't use 'this' outside of a class.",
        );
    }

    #[test]
    fn test_class_inheriting_from_itself() {
        assert_resolve_error(
            "class A < A {}",
            "[line 1] Error at 'A': A class can't inherit from itself.",
        );
    }

    #[test]
    fn test_super_outside_class() {
        assert_resolve_error(
            "super.method();",
            "[line 1] Error at 'super': Can't use 'super' outside of a class.",
        );
    }

    #[test]
    fn test_super_without_superclass() {
        assert_resolve_error(
            "class A { m() { super.m(); } }",
            "[line 1] Error at 'super': Can't use 'super' in a class with no superclass.",
        );
    }

    #[test]
    fn test_every_resolution_error_is_reported() {
        let outcome = run("return;\n{ var x = 1; var x = 2; }\nprint this;");

        assert!(outcome.status.had_compile_error);
        assert_eq!(
            outcome.errors,
            vec![
                "[line 1] Error at 'return': Can't return from top-level code.",
                "[line 2] Error at 'x': Already a variable with this name in this scope.",
                "[line 3] Error at 'this': Can't use 'this' outside of a class.",
            ]
        );
    }

    #[test]
    fn test_parse_errors_skip_resolution() {
        // The missing semicolon stops the run before the resolver sees `return`.
        let outcome = run("return 1;\nprint 1");

        assert_eq!(
            outcome.errors,
            vec!["[line 2] Error at end: Expect ';' after value."]
        );
    }

    #[test]
    fn test_closure_binds_to_declaration_scope() {
        let outcome = run(
            "var a = \"global\";
             {
               fun show() { print a; }
               show();
               var a = \"block\";
               show();
             }",
        );

        assert_eq!(outcome.errors, Vec::<String>::new());
        assert_eq!(outcome.output, vec!["global", "global"]);
    }
}
