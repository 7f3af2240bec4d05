// tests/basic_drawing.rs
use glam::Vec2;
use symbios::{SymbiosState, SymbolTable};
use symbios_turtle::{
    DrawOp, InterpretError, PathBlueprint, ProductionRules, TurtleConfig, TurtleInterpreter,
    TurtleOp, TurtlePose, rewrite,
};

const EPS: f32 = 1e-4;

fn standard(step: f32, angle: f32) -> TurtleInterpreter {
    TurtleInterpreter::standard(TurtleConfig::new(step, angle))
}

fn replay(ops: &[DrawOp]) -> Vec<TurtlePose> {
    let mut pose = TurtlePose::default();
    ops.iter()
        .map(|op| {
            pose = pose.apply(op);
            pose
        })
        .collect()
}

#[test]
fn test_forward_turn_forward() {
    // Heading starts at 90 (up). F moves up, + turns to 180, F moves left.
    let ops = standard(10.0, 90.0).interpret("F+F").unwrap();
    assert_eq!(
        ops,
        vec![
            DrawOp::MoveForward {
                distance: 10.0,
                drawing: true
            },
            DrawOp::TurnLeft(90.0),
            DrawOp::MoveForward {
                distance: 10.0,
                drawing: true
            },
        ]
    );

    let poses = replay(&ops);
    assert!(poses[0].position.abs_diff_eq(Vec2::new(0.0, 10.0), EPS));
    assert_eq!(poses[1].heading, 180.0);
    assert!(poses[2].position.abs_diff_eq(Vec2::new(-10.0, 10.0), EPS));
}

#[test]
fn test_branch_restores_pose_at_push() {
    let interpreter = standard(1.0, 25.0);
    let ops = interpreter.interpret("F[+F]F").unwrap();

    let pushed = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::PushPose(p) => Some(*p),
            _ => None,
        })
        .unwrap();
    let popped = ops
        .iter()
        .find_map(|op| match op {
            DrawOp::PopPose(p) => Some(*p),
            _ => None,
        })
        .unwrap();
    assert_eq!(pushed, popped);

    // The trailing F continues straight up from the branch point.
    let blueprint = interpreter.build_blueprint("F[+F]F").unwrap();
    assert_eq!(blueprint.segments.len(), 3);
    assert_eq!(blueprint.moves.len(), 1);
    let trunk = blueprint.segments[2];
    assert_eq!(trunk.start, pushed.position);
    assert!(trunk.end.abs_diff_eq(Vec2::new(0.0, 2.0), EPS));
    assert_eq!(blueprint.final_pose.heading, 90.0);
}

#[test]
fn test_pose_restoration_is_exact() {
    let interpreter = standard(3.7, 33.3);
    let before = interpreter.interpret_into("F+Ff-", &mut Vec::<DrawOp>::new()).unwrap();
    let after = interpreter
        .interpret_into("F+Ff-[F+F-ff[--F]+++F]", &mut Vec::<DrawOp>::new())
        .unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_unbalanced_pop_draws_nothing() {
    let interpreter = standard(1.0, 90.0);
    let mut ops = Vec::<DrawOp>::new();
    let err = interpreter.interpret_into("]", &mut ops).unwrap_err();
    assert_eq!(err, InterpretError::UnbalancedBracket { index: 0 });
    assert!(ops.is_empty());
}

#[test]
fn test_unbalanced_pop_keeps_partial_output() {
    let interpreter = standard(1.0, 90.0);
    let mut blueprint = interpreter.blueprint_sink();
    let err = interpreter
        .interpret_into("FF[F]]F", &mut blueprint)
        .unwrap_err();
    assert_eq!(err, InterpretError::UnbalancedBracket { index: 5 });
    assert_eq!(blueprint.segments.len(), 3);
    assert!(interpreter.interpret("FF[F]]F").is_err());
}

#[test]
fn test_pen_up_move_and_placeholders() {
    let interpreter = standard(2.0, 90.0);
    let ops = interpreter.interpret("LfRlr?").unwrap();
    assert_eq!(
        ops,
        vec![
            DrawOp::MoveForward {
                distance: 2.0,
                drawing: false
            },
            DrawOp::MoveForward {
                distance: 2.0,
                drawing: true
            },
            DrawOp::MoveForward {
                distance: 2.0,
                drawing: true
            },
        ]
    );

    let blueprint = interpreter.build_blueprint("LfRlr?").unwrap();
    assert_eq!(blueprint.moves.len(), 1);
    assert_eq!(blueprint.segments.len(), 2);
    assert!((blueprint.drawn_length() - 4.0).abs() < EPS);
}

#[test]
fn test_zero_and_negative_steps_are_accepted() {
    let blueprint = standard(0.0, 90.0).build_blueprint("FF").unwrap();
    assert_eq!(blueprint.segments.len(), 2);
    assert_eq!(blueprint.final_pose.position, Vec2::ZERO);

    let blueprint = standard(-1.0, 90.0).build_blueprint("F").unwrap();
    assert!(
        blueprint
            .final_pose
            .position
            .abs_diff_eq(Vec2::new(0.0, -1.0), EPS)
    );
}

#[test]
fn test_replayed_ops_match_streamed_blueprint() {
    let rules: ProductionRules = [('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")]
        .into_iter()
        .collect();
    let commands = rewrite(3, "X", &rules);
    let interpreter = standard(5.0, 25.0);

    let ops = interpreter.interpret(&commands).unwrap();
    let streamed = interpreter.build_blueprint(&commands).unwrap();
    let replayed = PathBlueprint::from_ops(TurtlePose::default(), &ops);
    assert_eq!(streamed, replayed);
}

#[test]
fn test_custom_symbol_map() {
    let mut interpreter = TurtleInterpreter::new(TurtleConfig::new(1.0, 60.0));
    interpreter.set_op('A', TurtleOp::Draw);
    interpreter.set_op('<', TurtleOp::TurnLeft);

    // 'F' is not registered on a bare interpreter.
    let ops = interpreter.interpret("FA<A").unwrap();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[1], DrawOp::TurnLeft(60.0));
}

#[test]
fn test_symbios_state_interpretation() {
    let mut interner = SymbolTable::new();
    let f_id = interner.intern("F").unwrap();
    let plus_id = interner.intern("+").unwrap();
    let push_id = interner.intern("[").unwrap();
    let pop_id = interner.intern("]").unwrap();

    // F(2) [ +(90) F ] F
    let mut state = SymbiosState::new();
    state.push(f_id, 0.0, &[2.0]).unwrap();
    state.push(push_id, 0.0, &[]).unwrap();
    state.push(plus_id, 0.0, &[90.0]).unwrap();
    state.push(f_id, 0.0, &[]).unwrap();
    state.push(pop_id, 0.0, &[]).unwrap();
    state.push(f_id, 0.0, &[]).unwrap();

    let interpreter = standard(1.0, 30.0);
    let mut blueprint = interpreter.blueprint_sink();
    let end = interpreter
        .interpret_state(&state, &interner, &mut blueprint)
        .unwrap();

    assert_eq!(blueprint.segments.len(), 3);
    // Branch used the parameterised 90 degree turn and the default step.
    assert!(
        blueprint.segments[1]
            .end
            .abs_diff_eq(Vec2::new(-1.0, 2.0), EPS)
    );
    assert!(end.position.abs_diff_eq(Vec2::new(0.0, 3.0), EPS));
}

#[test]
fn test_blueprint_sink_starts_at_initial_pose() {
    let config = TurtleConfig {
        initial_pose: TurtlePose::new(Vec2::new(50.0, 20.0), 0.0),
        ..TurtleConfig::new(1.0, 90.0)
    };
    let interpreter = TurtleInterpreter::standard(config);

    // Partial output on error still has bounds anchored at the start point.
    let mut blueprint = interpreter.blueprint_sink();
    interpreter
        .interpret_into("F]", &mut blueprint)
        .unwrap_err();
    assert_eq!(blueprint.bounds.min, Vec2::new(50.0, 20.0));
    assert!(
        blueprint
            .bounds
            .max
            .abs_diff_eq(Vec2::new(51.0, 20.0), EPS)
    );
    assert_eq!(blueprint, {
        let mut b = PathBlueprint::new(TurtlePose::new(Vec2::new(50.0, 20.0), 0.0));
        interpreter.interpret_into("F]", &mut b).unwrap_err();
        b
    });
}
