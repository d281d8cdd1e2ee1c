use log::{debug, trace};

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    hierarchy::ClassArena,
    join::JoinTable,
    symbols::FIELD_PREFIX,
};

/// Pushes inherited fields down the hierarchy and rejects incompatible overrides.
///
/// A subclass missing a field of its superclass inherits it. A subclass that
/// redefines one must give it a type whose join with the inherited type is
/// the inherited type. Repeats until a full pass inherits nothing, since a
/// field can cascade through several levels.
pub fn validate_overrides(classes: &mut ClassArena, joins: &JoinTable) -> Result<(), Error> {
    let mut passes = 0;

    loop {
        passes += 1;
        let mut changed = false;

        for id in classes.user_ids() {
            let Some(super_id) = classes.get(id).superclass else {
                continue;
            };

            let inherited: Vec<(String, String)> = classes
                .get(super_id)
                .table
                .fields()
                .map(|(name, ty)| (name.to_string(), ty.to_string()))
                .collect();

            let class = classes.get_mut(id);
            for (name, super_type) in inherited {
                let own_type = match class.table.get(&name) {
                    Some(ty) => ty.to_string(),
                    None => {
                        trace!("{} inherits {}: {}", class.name, name, super_type);
                        class.table.set(&name, &super_type);
                        changed = true;
                        continue;
                    }
                };

                if joins.join(&own_type, &super_type) != Some(super_type.as_str()) {
                    return Err(Error::new(
                        ErrorImpl::FieldOverrideMismatch {
                            class: class.name.clone(),
                            field: name.strip_prefix(FIELD_PREFIX).unwrap_or(&name).to_string(),
                            expected: super_type,
                            received: own_type,
                        },
                        class.position.clone(),
                    ));
                }
            }
        }

        if !changed {
            break;
        }
    }

    debug!("field overrides validated in {} passes", passes);
    Ok(())
}
