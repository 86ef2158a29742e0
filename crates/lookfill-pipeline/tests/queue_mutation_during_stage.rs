use std::sync::{Arc, Mutex};

use lookfill_engine::MatchTable;
use lookfill_model::{CellValue, ColRef, ColumnExtract};
use lookfill_pipeline::{BatchSequencer, CsvTable, ExportSink, IncomingFile, CSV_MEDIA_TYPE};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct NullSink {
    delivered: Mutex<Vec<String>>,
}

impl ExportSink for NullSink {
    fn deliver(&self, _bytes: Vec<u8>, _media_type: &str, filename: &str) {
        self.delivered
            .lock()
            .expect("sink mutex poisoned")
            .push(filename.to_string());
    }
}

const TARGET: &[u8] = b",name\nwidget,w\ngadget,g\n";

fn file(name: &str) -> IncomingFile {
    IncomingFile {
        bytes: TARGET.to_vec(),
        media_type: CSV_MEDIA_TYPE.to_string(),
        display_name: name.to_string(),
    }
}

fn table() -> MatchTable {
    MatchTable::build(
        &ColumnExtract::from_rows([CellValue::from("widget"), CellValue::from("gadget")]),
        &ColumnExtract::from_rows([CellValue::from(3.0), CellValue::from(5.0)]),
    )
}

// Removing an entry while a stage traversal is suspended at its yield point
// must not break the order of the remaining entries: the traversal resolves
// each snapshotted identity per step and simply skips the missing one.
#[tokio::test]
async fn removal_during_a_suspended_fill_skips_only_that_entry() {
    let sequencer = BatchSequencer::new(
        Arc::new(CsvTable::default()),
        Arc::new(CsvTable::default()),
        Arc::new(NullSink::default()),
    );
    let outcomes = sequencer
        .load_files(vec![file("a.csv"), file("b.csv"), file("c.csv")])
        .await;
    let ids: Vec<u64> = outcomes
        .iter()
        .map(|o| *o.result.as_ref().unwrap())
        .collect();

    // On a current-thread runtime this task first runs when the fill stage
    // yields between its first and second items.
    let queue = sequencer.queue().clone();
    let b = ids[1];
    let remover = tokio::spawn(async move {
        queue.remove(b).await;
    });

    let table = table();
    let reports = sequencer
        .fill_all(&table, 0, ColRef::from_name("A").unwrap(), ColRef::from_name("C").unwrap())
        .await;
    remover.await.unwrap();

    let report_ids: Vec<u64> = reports.iter().map(|r| r.identity).collect();
    assert_eq!(report_ids, vec![ids[0], ids[2]]);
    assert_eq!(sequencer.queue().identities().await, vec![ids[0], ids[2]]);
}
