//! Per-collider detection step, run from the collider's fixed update

use crate::ecs::component::{ComponentKind, UpdateTag};
use crate::ecs::components::{Collider, Contact, PhysicsBody};
use crate::ecs::context::ComponentContext;
use crate::ecs::object::ObjectId;
use crate::ecs::object_tag::ObjectTag;
use crate::foundation::math::Vec2;
use crate::physics::collision::{resolve_velocity, BodyState, TriggerEvent, TriggerPhase, WorldShape};

/// What the collider needs to know about another collider's object
struct Partner {
    object: ObjectId,
    tag: ObjectTag,
    shape: Option<WorldShape>,
    is_trigger: bool,
    body: Option<BodyState>,
}

fn gather_partners(ctx: &ComponentContext<'_>) -> Vec<Partner> {
    let own = ctx.object();
    let scene = ctx.scene();
    scene
        .index()
        .keys(UpdateTag::Collision)
        .filter(|key| key.object != own && key.kind == ComponentKind::of::<Collider>())
        .filter_map(|key| {
            let object = scene.object(key.object)?;
            let collider = object.component::<Collider>()?;
            Some(Partner {
                object: key.object,
                tag: object.tag(),
                // Built from the partner's transform now: its cached shape may
                // predate this tick's integration.
                shape: collider.shape.map(|shape| shape.to_world(object.transform())),
                is_trigger: collider.is_trigger,
                body: object.component::<PhysicsBody>().map(PhysicsBody::state),
            })
        })
        .collect()
}

/// Velocity the initiating body should take after the contact at `point`
fn resolve_contact(
    own_body: Option<BodyState>,
    own_shape: WorldShape,
    partner: &Partner,
    point: Vec2,
) -> Option<Vec2> {
    let Some(own) = own_body else {
        log::trace!("Contact with {:?} left unresolved: no physics body", partner.object);
        return None;
    };
    if own.is_static {
        return None;
    }
    let Some(normal) = own_shape
        .normal_at(point)
        .or_else(|| partner.shape.and_then(|shape| shape.normal_at(point)))
    else {
        log::trace!("Contact with {:?} left unresolved: no surface normal", partner.object);
        return None;
    };
    Some(resolve_velocity(normal, own, partner.body))
}

fn push_event(collider: &mut Collider, phase: TriggerPhase, other: ObjectId, point: Vec2) {
    collider.events.push(TriggerEvent { phase, other, point });
}

/// Run one fixed tick of detection for `collider`
pub(crate) fn step_collider(collider: &mut Collider, ctx: &mut ComponentContext<'_>) {
    collider.events.clear();
    collider.refresh(ctx.transform());

    // Resolution computed on the previous fixed tick lands now
    if let Some(velocity) = collider.pending_velocity.take() {
        if let Some(body) = ctx.component_mut::<PhysicsBody>() {
            body.velocity = velocity;
        }
    }

    let own_tag = ctx.tag();
    let own_body = ctx.component::<PhysicsBody>().map(PhysicsBody::state);
    let partners = gather_partners(ctx);

    for partner in &partners {
        let overlap = match (collider.world, partner.shape) {
            (Some(own_shape), Some(other_shape))
                if own_tag.should_collide(partner.tag, collider.collide_same_tag) =>
            {
                own_shape.intersect(&other_shape).map(|point| (own_shape, point))
            }
            _ => None,
        };

        match overlap {
            Some((own_shape, point)) => {
                if !collider.triggering {
                    collider.triggering = true;
                    collider.trigger_start = Some(point);
                    collider.trigger_end = None;
                }
                collider.intersection_center = Some(point);

                if let Some(contact) = collider.contacts.get_mut(&partner.object).filter(|c| c.overlapping) {
                    contact.latest_point = point;
                } else {
                    collider.contacts.insert(
                        partner.object,
                        Contact { entry_point: point, latest_point: point, exit_point: None, overlapping: true },
                    );
                    if !partner.is_trigger {
                        collider.collision_point = Some(point);
                    }
                    if !collider.is_trigger && !partner.is_trigger {
                        if let Some(velocity) = resolve_contact(own_body, own_shape, partner, point) {
                            collider.pending_velocity = Some(velocity);
                        }
                    }
                    push_event(collider, TriggerPhase::Enter, partner.object, point);
                }
                push_event(collider, TriggerPhase::Stay, partner.object, point);
            }
            None => {
                let ended = collider.contacts.get_mut(&partner.object).filter(|c| c.overlapping).map(|contact| {
                    contact.overlapping = false;
                    contact.exit_point = Some(contact.latest_point);
                    contact.latest_point
                });
                if let Some(point) = ended {
                    if !partner.is_trigger {
                        collider.collision_point = None;
                    }
                    push_event(collider, TriggerPhase::Exit, partner.object, point);
                }
            }
        }
    }

    // Partners that left the scene end their episode too
    let vanished: Vec<ObjectId> = collider
        .contacts
        .keys()
        .filter(|id| !partners.iter().any(|partner| partner.object == **id))
        .copied()
        .collect();
    for id in vanished {
        if let Some(contact) = collider.contacts.remove(&id) {
            if contact.overlapping {
                push_event(collider, TriggerPhase::Exit, id, contact.latest_point);
            }
        }
    }

    if collider.triggering && !collider.contacts.values().any(|contact| contact.overlapping) {
        collider.triggering = false;
        collider.trigger_end = collider.intersection_center;
        collider.collision_point = None;
    }
}
