/*!

This is the long-form manual for `firm_positioning` and `compmap`.

## Scores

Every firm is scored from 1 to 10 on three axes:

| column              | 1                          | 10                       |
|---------------------|----------------------------|--------------------------|
| `Offering_Nature`   | functional, specialist     | holistic, end-to-end     |
| `Value_Proposition` | cost efficiency            | innovation               |
| `SME_Focus`         | minimal SME orientation    | strong SME orientation   |

Scores must be integers. Values outside of [1, 10] are rejected, they are never
clamped to the boundaries.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values
* `xlsx` Excel workbook

### csv

The first row is the header. The columns are found by name, their order is not
significant and extra columns are ignored:

```text
Firm,Offering_Nature,Value_Proposition,SME_Focus
Alpha Advisors,9,8,7
Beta Consulting,3,4,9
```

Missing columns are filled in: `Firm` with an empty name, the scores with 5.
Empty score cells are also read as 5. Rows without a firm name are skipped (and
reported). A score that is not an integer between 1 and 10 stops the load: no
firm is read in this case.

The annexure exported by `compmap` is itself a valid input: the derived columns
are ignored and recomputed.

### xlsx

Same layout as `csv`, in the first worksheet of the workbook or in the worksheet
given with `--worksheet` (or `worksheetName` in the session file). Numbers may be
stored as text or as numbers.

## Derived columns

| column              | content                                                  |
|---------------------|----------------------------------------------------------|
| `AI_Explanation`    | one sentence built from a fixed template (no model call) |
| `White_Space_Score` | `(Offering_Nature + Value_Proposition) / 2 - (10 - SME_Focus) * 0.1` |
| `WS_Interpretation` | `Very high opportunity` (>= 7.5), `High opportunity` (>= 6), `Moderate` (>= 4.5), `Low` |

## Session file

`compmap` accepts a session description in JSON. All the fields are optional.
Paths are relative to the directory of the session file.

```json
{
  "source": { "provider": "csv", "filePath": "firms.csv" },
  "outputSettings": {
    "reportPath": "report.json",
    "exportPath": "firms_clean.csv",
    "notesPath": "AI_prompt_log.txt"
  },
  "edits": [
    { "op": "add", "firm": "Gamma", "offeringNature": 6, "valueProposition": 7, "smeFocus": 8 },
    { "op": "update", "id": 1, "field": "smeFocus", "value": 9 },
    { "op": "update", "id": 2, "field": "firm", "value": "Beta Partners" },
    { "op": "delete", "id": 3 },
    { "op": "deleteByName", "firm": "Beta" },
    { "op": "reset" }
  ],
  "notes": "Free-form notes, exported verbatim."
}
```

Edits are applied in order. Firms are numbered from 1 in the order of the input
file; added firms get the next numbers. An edit that fails validation (empty name,
score out of range, unknown id) is reported and skipped, the following edits are
still applied. `deleteByName` removes every firm with that name.

 */
