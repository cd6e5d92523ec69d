//! Bouncing ball object and its behavior

use ecs_kernel::prelude::*;
use rand::Rng;

/// Random velocity with each axis in [-500, 500)
pub fn random_velocity(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0))
}

fn random_color(rng: &mut impl Rng) -> Color {
    Color::rgb(rng.gen(), rng.gen(), rng.gen())
}

/// A ball that falls, bounces off the side walls and respawns at the top
#[derive(Debug, Default)]
pub struct Bouncer;

impl ObjectScript for Bouncer {
    fn tag(&self) -> ObjectTag {
        ObjectTag::Bullet
    }

    fn init(&mut self, scene: &mut Scene, object: ObjectId) -> Result<(), EngineError> {
        let mut rng = rand::thread_rng();
        let radius = 5.0 * scene.unit_width();
        let center = Transform::at(scene.width() / 2.0, scene.height() / 2.0).with_uniform_scale(0.35);

        *scene.transform_mut(object).ok_or(EngineError::ObjectNotFound(object))? = center;
        scene.attach_component_with(object, || Renderable::new(Sprite::circle(radius, random_color(&mut rng))))?;
        scene.attach_component_with(object, || Collider::circle(radius).colliding_same_tag())?;
        let velocity = random_velocity(&mut rng);
        scene.attach_component_with(object, || {
            let mut body = PhysicsBody::new().with_velocity(velocity);
            body.use_gravity = true;
            body.use_drag = true;
            body
        })?;
        scene.attach_component::<BouncerBehavior>(object)?;
        Ok(())
    }
}

/// Keeps a [`Bouncer`] inside the surface
#[derive(Debug, Default)]
pub struct BouncerBehavior {
    respawns: u32,
}

impl BouncerBehavior {
    /// How often the ball fell out and came back
    pub fn respawns(&self) -> u32 {
        self.respawns
    }
}

impl Component for BouncerBehavior {
    fn tag(&self) -> UpdateTag {
        UpdateTag::Behavior
    }

    fn update(&mut self, ctx: &mut ComponentContext<'_>) {
        let (width, height) = (ctx.scene().width(), ctx.scene().height());
        let Some(reach) = ctx
            .component::<Collider>()
            .and_then(Collider::world_shape)
            .map(|shape| shape.bounds().half_extents())
        else {
            return;
        };
        let position = ctx.transform().position;
        let Some(body) = ctx.component_mut::<PhysicsBody>() else {
            return;
        };

        let v = body.velocity;
        if (position.x > width - reach.x && v.x > 0.0) || (position.x < reach.x && v.x < 0.0) {
            body.velocity.x = -v.x;
        }
        if (position.y > height - reach.y && v.y > 0.0) || (position.y < reach.y && v.y < 0.0) {
            body.velocity.y = -v.y;
        }

        if position.y > height + reach.y {
            body.velocity = random_velocity(&mut rand::thread_rng());
            ctx.transform_mut().position = Vec2::new(width / 2.0, -reach.y);
            self.respawns += 1;
            log::debug!("Bouncer {:?} respawned ({} so far)", ctx.object(), self.respawns);
        }
    }

    fn as_behavior(&mut self) -> Option<&mut dyn Behavior> {
        Some(self)
    }
}

impl Behavior for BouncerBehavior {
    fn on_trigger_enter(&mut self, ctx: &mut ComponentContext<'_>, event: &TriggerEvent) {
        log::trace!("Bouncer {:?} hit {:?} at {:?}", ctx.object(), event.other, event.point);
    }
}
