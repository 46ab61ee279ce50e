// ABOUTME: Tree-walking evaluator executing a parsed Program against an environment

use crate::ast::{
    BlockStatement, Expression, IfExpression, Program, Statement,
};
use crate::env::Environment;
use crate::error::EvalError;
use crate::object::Object;
use std::rc::Rc;

/// Evaluates a top-level program. Unwraps `ReturnValue` immediately (this
/// is the only site, besides a function call boundary, where that
/// unwrapping happens) and short-circuits on the first error.
pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(inner) => {
                tracing::debug!("return value unwrapped at program boundary");
                return *inner;
            }
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

/// Evaluates a block's statements in order. Unlike `eval_program`, a
/// `ReturnValue` survives unwrapped here so it keeps propagating through
/// nested blocks until it reaches the enclosing function call or program.
fn eval_block_statement(block: &BlockStatement, env: &Rc<Environment>) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Object {
    match statement {
        Statement::Let(let_stmt) => {
            let value = eval_expression(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.set(let_stmt.name.value.clone(), value.clone());
            value
        }
        Statement::Return(return_stmt) => {
            let value = eval_expression(&return_stmt.return_value, env);
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression(expr_stmt) => eval_expression(&expr_stmt.expression, env),
    }
}

fn eval_expression(expr: &Expression, env: &Rc<Environment>) -> Object {
    match expr {
        Expression::IntegerLiteral(lit) => Object::Integer(lit.value),
        Expression::BooleanLiteral(lit) => Object::Boolean(lit.value),
        Expression::Identifier(ident) => env
            .get(&ident.value)
            .unwrap_or_else(|| Object::Error(EvalError::IdentifierNotFound(ident.value.clone()).message())),
        Expression::Prefix(prefix) => {
            let right = eval_expression(&prefix.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(&prefix.operator, right)
        }
        Expression::Infix(infix) => {
            let left = eval_expression(&infix.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(&infix.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(&infix.operator, left, right)
        }
        Expression::If(if_expr) => eval_if_expression(if_expr, env),
        Expression::Function(func) => Object::Function {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        },
        Expression::Call(call) => {
            let function = eval_expression(&call.function, env);
            if function.is_error() {
                return function;
            }

            let mut args = Vec::with_capacity(call.arguments.len());
            for arg in &call.arguments {
                let evaluated = eval_expression(arg, env);
                if evaluated.is_error() {
                    return evaluated;
                }
                args.push(evaluated);
            }

            apply_function(function, args)
        }
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(n) => Object::Integer(-n),
            other => Object::Error(
                EvalError::UnknownPrefixOperator {
                    op: operator.to_string(),
                    operand: other.type_name(),
                }
                .message(),
            ),
        },
        _ => unreachable!("lexer/parser only produce ! and - prefix operators"),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            "==" => Object::Boolean(l == r),
            "!=" => Object::Boolean(l != r),
            _ => Object::Error(
                EvalError::UnknownInfixOperator {
                    left: left.type_name(),
                    op: operator.to_string(),
                    right: right.type_name(),
                }
                .message(),
            ),
        },
        _ if left.type_name() != right.type_name() => Object::Error(
            EvalError::TypeMismatch {
                left: left.type_name(),
                op: operator.to_string(),
                right: right.type_name(),
            }
            .message(),
        ),
        _ => Object::Error(
            EvalError::UnknownInfixOperator {
                left: left.type_name(),
                op: operator.to_string(),
                right: right.type_name(),
            }
            .message(),
        ),
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(
            EvalError::UnknownInfixOperator {
                left: "INTEGER",
                op: operator.to_string(),
                right: "INTEGER",
            }
            .message(),
        ),
    }
}

fn eval_if_expression(if_expr: &IfExpression, env: &Rc<Environment>) -> Object {
    let condition = eval_expression(&if_expr.condition, env);
    if condition.is_error() {
        return condition;
    }

    if condition.is_truthy() {
        eval_block_statement(&if_expr.consequence, env)
    } else if let Some(alternative) = &if_expr.alternative {
        eval_block_statement(alternative, env)
    } else {
        Object::Null
    }
}

/// Applies a callee to already-evaluated arguments. Arity is not checked:
/// excess arguments are dropped, and a missing parameter surfaces as
/// `identifier not found` only if the body actually references it.
fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Function {
            parameters,
            body,
            env,
        } => {
            let call_env = Environment::new_enclosed(env);
            for (param, arg) in parameters.iter().zip(args) {
                call_env.set(param.value.clone(), arg);
            }

            let evaluated = eval_block_statement(&body, &call_env);
            match evaluated {
                Object::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        other => Object::Error(EvalError::NotAFunction(other.type_name()).message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn test_eval(input: &str) -> Object {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn test_eval_integer_expression() {
        let cases = [
            ("5", 5i64),
            ("10", 10),
            ("-5", -5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("5 + 2 * 10", 25),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * 3 * 3 + 10", 37),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ];

        for (input, expected) in cases {
            match test_eval(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("expected Integer for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_eval_boolean_expression() {
        let cases = [
            ("true", true),
            ("false", false),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 < 1", false),
            ("1 > 1", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("1 == 2", false),
            ("1 != 2", true),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 < 2) == false", false),
            ("(1 > 2) == false", true),
        ];

        for (input, expected) in cases {
            match test_eval(input) {
                Object::Boolean(b) => assert_eq!(b, expected, "input: {}", input),
                other => panic!("expected Boolean for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_bang_operator() {
        let cases = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!true", true),
            ("!!false", false),
            ("!!5", true),
        ];

        for (input, expected) in cases {
            match test_eval(input) {
                Object::Boolean(b) => assert_eq!(b, expected, "input: {}", input),
                other => panic!("expected Boolean for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_if_else_expressions() {
        assert!(matches!(test_eval("if (true) { 10 }"), Object::Integer(10)));
        assert!(matches!(test_eval("if (false) { 10 }"), Object::Null));
        assert!(matches!(test_eval("if (1) { 10 }"), Object::Integer(10)));
        assert!(matches!(test_eval("if (1 < 2) { 10 }"), Object::Integer(10)));
        assert!(matches!(test_eval("if (1 > 2) { 10 }"), Object::Null));
        assert!(matches!(
            test_eval("if (1 > 2) { 10 } else { 20 }"),
            Object::Integer(20)
        ));
        assert!(matches!(
            test_eval("if (1 < 2) { 10 } else { 20 }"),
            Object::Integer(10)
        ));
    }

    #[test]
    fn test_return_statements() {
        let cases = [
            ("return 10;", 10i64),
            ("return 10; 9;", 10),
            ("return 2 * 5; 9;", 10),
            ("9; return 2 * 5; 9;", 10),
        ];
        for (input, expected) in cases {
            match test_eval(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("expected Integer for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_return_exits_nested_blocks() {
        let input = "if (10 > 1) {\n  if (10 > 1) {\n    return 10;\n  }\n\n  return 1;\n}";
        match test_eval(input) {
            Object::Integer(n) => assert_eq!(n, 10),
            other => panic!("expected Integer(10), got {:?}", other),
        }
    }

    #[test]
    fn test_error_handling() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            (
                "if (10 > 1) { true + false; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            (
                "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
                "unknown operator: BOOLEAN + BOOLEAN",
            ),
            ("foobar", "identifier not found: foobar"),
        ];

        for (input, expected) in cases {
            match test_eval(input) {
                Object::Error(msg) => assert_eq!(msg, expected, "input: {}", input),
                other => panic!("expected Error for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_let_statements() {
        let cases = [
            ("let a = 5; a;", 5i64),
            ("let a = 5 * 5; a;", 25),
            ("let a = 5; let b = a; b;", 5),
            ("let a = 5; let b = a; let c = a + b + 5; c;", 15),
        ];
        for (input, expected) in cases {
            match test_eval(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("expected Integer for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_function_object() {
        match test_eval("fn(x) { x + 2; };") {
            Object::Function { parameters, .. } => {
                assert_eq!(parameters.len(), 1);
                assert_eq!(parameters[0].value, "x");
            }
            other => panic!("expected Function, got {:?}", other),
        }
    }

    #[test]
    fn test_function_application() {
        let cases = [
            ("let identity = fn(x) { x; }; identity(5);", 5i64),
            ("let identity = fn(x) { return x; }; identity(5);", 5),
            ("let double = fn(x) { x * 2; }; double(5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5, 5);", 10),
            ("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));", 20),
            ("fn(x) { x; }(5)", 5),
        ];
        for (input, expected) in cases {
            match test_eval(input) {
                Object::Integer(n) => assert_eq!(n, expected, "input: {}", input),
                other => panic!("expected Integer for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_closures_capture_environment() {
        let input = "let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(2);";
        match test_eval(input) {
            Object::Integer(n) => assert_eq!(n, 4),
            other => panic!("expected Integer(4), got {:?}", other),
        }
    }

    #[test]
    fn test_function_with_no_free_variables_is_call_site_independent() {
        let input = "let k = fn() { 42 }; let wrapper = fn() { let unrelated = 99; k() }; wrapper();";
        match test_eval(input) {
            Object::Integer(n) => assert_eq!(n, 42),
            other => panic!("expected Integer(42), got {:?}", other),
        }
    }
}
