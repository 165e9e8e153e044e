mod common;

#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;

    use super::common::parse;

    fn assert_parses_to(source: &str, expected: &[&str]) {
        let (printed, errors) = parse(source);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(printed, expected);
    }

    #[test]
    fn test_parser_01_precedence() {
        assert_parses_to("1 + 2 * 3;", &["(; (+ 1.0 (* 2.0 3.0)))"]);
        assert_parses_to("1 - 2 - 3;", &["(; (- (- 1.0 2.0) 3.0))"]);
        assert_parses_to(
            "-(1 - 2) == !true;",
            &["(; (== (- (group (- 1.0 2.0))) (! true)))"],
        );
        assert_parses_to("1 < 2 != 3 >= 4.5;", &["(; (!= (< 1.0 2.0) (>= 3.0 4.5)))"]);
    }

    #[test]
    fn test_parser_02_logical_and_assignment() {
        assert_parses_to("a or b and c;", &["(; (or a (and b c)))"]);
        assert_parses_to("a = b = 3;", &["(; (= a (= b 3.0)))"]);
        assert_parses_to("a.b = c;", &["(; (.= a b c))"]);
    }

    #[test]
    fn test_parser_03_calls_and_properties() {
        assert_parses_to(
            "obj.field.method(1, \"x\")(2);",
            &["(; (call (call (. (. obj field) method) 1.0 x) 2.0))"],
        );
        assert_parses_to("clock();", &["(; (call clock))"]);
    }

    #[test]
    fn test_parser_04_statements() {
        assert_parses_to(
            "var a; var b = nil; if (a) print 1; else { print 2; }",
            &[
                "(var a)",
                "(var b nil)",
                "(if a (print 1.0) (block (print 2.0)))",
            ],
        );
        assert_parses_to(
            "while (x > 0) x = x - 1;",
            &["(while (> x 0.0) (; (= x (- x 1.0))))"],
        );
    }

    #[test]
    fn test_parser_05_for_is_desugared() {
        assert_parses_to(
            "for (var i = 0; i < 3; i = i + 1) print i;",
            &["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"],
        );
        assert_parses_to("for (;;) print 1;", &["(while true (print 1.0))"]);
    }

    #[test]
    fn test_parser_06_functions_and_classes() {
        assert_parses_to(
            "fun add(a, b) { return a + b; } fun nop() { return; }",
            &[
                "(fun add (a b) (return (+ a b)))",
                "(fun nop () (return))",
            ],
        );
        assert_parses_to(
            "class B < A { init(x) { this.x = x; } get() { return super.get(); } }",
            &["(class B < A (fun init (x) (; (.= this x x))) (fun get () (return (call (super get)))))"],
        );
    }

    #[test]
    fn test_parser_07_recovers_and_reports_every_error() {
        let (printed, errors) = parse("print 1 +;\nvar y = 2;\nprint y;\nvar = 3;");

        assert_eq!(
            errors,
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 4] Error at '=': Expect variable name.",
            ]
        );
        assert_eq!(printed, vec!["(var y 2.0)", "(print y)"]);
    }

    #[test]
    fn test_parser_08_error_at_end() {
        let (_, errors) = parse("print 1");

        assert_eq!(errors, vec!["[line 1] Error at end: Expect ';' after value."]);
    }

    #[test]
    fn test_parser_09_invalid_assignment_target_is_not_fatal() {
        let (printed, errors) = parse("1 + 2 = 3;\nprint 4;");

        assert_eq!(errors, vec!["[line 1] Error at '=': Invalid assignment target."]);
        assert_eq!(printed, vec!["(; (+ 1.0 2.0))", "(print 4.0)"]);
    }

    #[test]
    fn test_parser_10_argument_limit() {
        let args: Vec<&str> = vec!["0"; 256];
        let source = format!("f({});", args.join(", "));

        let (printed, errors) = parse(&source);

        assert_eq!(errors, vec!["[line 1] Error at '0': Can't have more than 255 arguments."]);
        assert_eq!(printed.len(), 1);

        let (_, errors) = parse(&format!("f({});", vec!["0"; 255].join(", ")));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parser_11_parameter_limit() {
        let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
        let source = format!("fun f({}) {{}}", params.join(", "));

        let (_, errors) = parse(&source);

        assert_eq!(errors, vec!["[line 1] Error at 'p255': Can't have more than 255 parameters."]);
    }

    #[test]
    fn test_parser_12_super_requires_method_name() {
        let (_, errors) = parse("super;");

        assert_eq!(errors, vec!["[line 1] Error at ';': Expect '.' after 'super'."]);
    }
}
